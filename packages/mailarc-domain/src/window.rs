//! Thread date windows.

use time::Duration;

/// Span of days around a seed email's date that bounds thread membership.
///
/// Only a fixed set of spans is accepted; anything else is a client error
/// at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadWindow {
	Week,
	Fortnight,
	Month,
	TwoMonths,
	Quarter,
}
impl ThreadWindow {
	pub const ALLOWED_DAYS: [u16; 5] = [7, 14, 30, 60, 90];

	pub fn from_days(days: u16) -> Option<Self> {
		match days {
			7 => Some(Self::Week),
			14 => Some(Self::Fortnight),
			30 => Some(Self::Month),
			60 => Some(Self::TwoMonths),
			90 => Some(Self::Quarter),
			_ => None,
		}
	}

	pub fn days(self) -> u16 {
		match self {
			Self::Week => 7,
			Self::Fortnight => 14,
			Self::Month => 30,
			Self::TwoMonths => 60,
			Self::Quarter => 90,
		}
	}

	pub fn duration(self) -> Duration {
		Duration::days(i64::from(self.days()))
	}
}
