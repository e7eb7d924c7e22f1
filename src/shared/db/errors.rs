use regex::Regex;
use sea_orm::DbErr;
use std::sync::OnceLock;

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Postgres detail line: `Key (email)=(a@b.c) already exists.`
    PATTERN.get_or_init(|| Regex::new(r"Key \((?P<field>[^)]+)\)=").expect("static regex"))
}

/// True when the error is a unique constraint violation (SQLSTATE 23505).
pub fn is_unique_violation(err: &DbErr) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("23505") || msg.contains("duplicate") || msg.contains("unique")
}

/// Column(s) named by a unique violation, falling back to the constraint name.
pub fn violated_field(err: &DbErr) -> Option<String> {
    if !is_unique_violation(err) {
        return None;
    }

    let msg = err.to_string();

    if let Some(caps) = key_pattern().captures(&msg) {
        return Some(caps["field"].to_string());
    }

    msg.split('"').nth(1).map(|constraint| constraint.to_string())
}
