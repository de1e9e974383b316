use chrono::NaiveDateTime;

/// Source of "now" for date-anchored logic. Handlers take this through
/// `web::Data<dyn Clock>` so tests can pin the calendar date.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
