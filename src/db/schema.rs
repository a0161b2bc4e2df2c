pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS prompts (
    id TEXT PRIMARY KEY,              -- nano ID (21 chars)
    title TEXT NOT NULL,              -- sanitized display title
    content TEXT NOT NULL,            -- the prompt text
    version TEXT NOT NULL DEFAULT '1.0',
    model_type TEXT NOT NULL,         -- e.g. \"gpt-4\", \"claude-3-opus\"
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS prompt_tags (
    prompt_id TEXT NOT NULL REFERENCES prompts(id),
    tag_id TEXT NOT NULL REFERENCES tags(id),
    PRIMARY KEY (prompt_id, tag_id)
);

CREATE TABLE IF NOT EXISTS prompt_versions (
    id TEXT PRIMARY KEY,
    prompt_id TEXT NOT NULL REFERENCES prompts(id),
    content TEXT NOT NULL,            -- content snapshot taken before an update
    version TEXT NOT NULL,            -- version label at snapshot time
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_prompts_model ON prompts(model_type);
CREATE INDEX IF NOT EXISTS idx_prompt_versions_prompt ON prompt_versions(prompt_id, created_at DESC);
";
