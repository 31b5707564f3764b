use chrono::{Datelike, NaiveDateTime, Timelike};

// Ausgrid EA025 network price schedule (2025-26).
// https://www.ausgrid.com.au/-/media/Documents/Regulation/Pricing/PList/Ausgrid-Network-Price-List-2025-26.pdf
const PEAK_CHARGE: f64 = 32.1695; // c/kWh
const OFFPEAK_CHARGE: f64 = 5.6688; // c/kWh

/// Network usage charge in $/MWh at the given local timestamp.
///
/// Peak applies 15:00-21:00 during the summer (Nov-Mar) and winter (Jun-Aug)
/// months. The schedule has no shoulder rate: Apr, May, Sep and Oct are
/// off-peak at any hour.
pub fn network_rate(at: NaiveDateTime) -> f64 {
    let month = at.month();
    let hour = at.hour();

    let summer = matches!(month, 11 | 12 | 1..=3);
    let winter = matches!(month, 6..=8);

    if (summer || winter) && (15..21).contains(&hour) {
        PEAK_CHARGE * 10.0
    } else {
        OFFPEAK_CHARGE * 10.0
    }
}
