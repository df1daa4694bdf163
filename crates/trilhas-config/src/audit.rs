use std::env;
use std::str::FromStr;

/// Where audit records are appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditSinkKind {
    /// Insert into the `audit_logs` table.
    Postgres,
    /// Emit on the `audit` tracing target.
    Log,
}

impl FromStr for AuditSinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" | "database" => Ok(Self::Postgres),
            "log" | "tracing" => Ok(Self::Log),
            other => Err(format!("unknown audit sink '{}'", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuditConfig {
    pub sink: AuditSinkKind,
}

impl AuditConfig {
    /// Reads `AUDIT_SINK` (`postgres` or `log`, default `log`).
    pub fn from_env() -> Self {
        Self {
            sink: env::var("AUDIT_SINK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(AuditSinkKind::Log),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            sink: AuditSinkKind::Log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sink_kind() {
        assert_eq!("postgres".parse::<AuditSinkKind>(), Ok(AuditSinkKind::Postgres));
        assert_eq!(" LOG ".parse::<AuditSinkKind>(), Ok(AuditSinkKind::Log));
        assert!("kafka".parse::<AuditSinkKind>().is_err());
    }
}
