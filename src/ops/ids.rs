use chrono::Utc;

/// Source of fresh link identifiers
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Base-36 ids from a strictly increasing microsecond clock
#[derive(Debug, Default)]
pub struct ClockIds {
    last: i64,
}

impl IdSource for ClockIds {
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_micros();
        self.last = now.max(self.last + 1);
        to_base36(self.last.unsigned_abs())
    }
}

/// Predictable ids (`prefix1`, `prefix2`, ...) for tests and fixtures
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        SequentialIds {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
