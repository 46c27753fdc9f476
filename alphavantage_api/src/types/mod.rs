mod series;
pub use self::series::{
    Observation, SeriesPayload, TimeSeries, DAILY_CLOSE_FIELD, DAILY_SERIES_KEY,
    DIGITAL_CLOSE_FIELD, DIGITAL_SERIES_KEY,
};
