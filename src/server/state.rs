use crate::location::TimezoneResolver;

pub struct AppState {
    pub resolver: TimezoneResolver,
}
