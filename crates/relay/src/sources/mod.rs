pub mod alertmanager;

pub use alertmanager::{parse_batch, Alert, AlertBatch, DecodeError};
