mod time_point_sec;
pub use time_point_sec::TimePointSec;
