pub mod dialer_csv;

pub use dialer_csv::parse_dialer_csv;
