use super::CommandDef;

pub(super) fn score_match(q: &str, candidate: &str) -> i32 {
    let q = q.to_lowercase();
    let c = candidate.to_lowercase();
    if c == q {
        return 100;
    }
    if c.starts_with(&q) {
        return 50 - (c.len() as i32 - q.len() as i32);
    }
    if c.contains(&q) {
        return 10;
    }
    0
}

/// Best score of `q` against a command's name and aliases.
pub(super) fn score_def(q: &str, def: &CommandDef) -> i32 {
    def.aliases
        .iter()
        .fold(score_match(q, def.name), |best, a| best.max(score_match(q, a)))
}

/// Highest score first; ties by name.
pub(super) fn sort_scored_suggestions(scored: &mut [(i32, CommandDef)]) {
    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.name.cmp(b.name)));
}

#[cfg(test)]
#[path = "../tests/tui_shell/suggest_tests.rs"]
mod tests;
