use std::fmt;

/// Terminal state reached by one handled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    ParseFailed,
    DeliveryFailed,
    SerializationFailed,
    Delivered,
}

impl RelayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayState::ParseFailed => "parse_failed",
            RelayState::DeliveryFailed => "delivery_failed",
            RelayState::SerializationFailed => "serialization_failed",
            RelayState::Delivered => "delivered",
        }
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayState::ParseFailed => write!(f, "ParseFailed"),
            RelayState::DeliveryFailed => write!(f, "DeliveryFailed"),
            RelayState::SerializationFailed => write!(f, "SerializationFailed"),
            RelayState::Delivered => write!(f, "Delivered"),
        }
    }
}
