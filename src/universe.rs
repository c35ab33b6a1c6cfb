// =============================================================================
// Tracked Universe
// =============================================================================
//
// The thirty Straits Times Index constituents and the SGX holiday calendar.
// Basket order is significant: screens evaluate, bucket and tie-break in
// exactly this order, which keeps repeated runs over the same archive
// reproducible.

use chrono::NaiveDate;

use crate::types::Instrument;

/// (display name, SGX ticker) for every tracked STI constituent.
const STI_BASKET: [(&str, &str); 30] = [
    ("CityDev", "C09.SI"),
    ("DBS", "D05.SI"),
    ("UOL", "U14.SI"),
    ("SingTel", "Z74.SI"),
    ("UOB", "U11.SI"),
    ("Keppel Corp", "BN4.SI"),
    ("CapitaLand", "C31.SI"),
    ("OCBC Bank", "O39.SI"),
    ("Genting Sing", "G13.SI"),
    ("Venture", "V03.SI"),
    ("CapitaMall Trust", "C38U.SI"),
    ("YZJ Shipbldg SGD", "BS6.SI"),
    ("CapitaCom Trust", "C61U.SI"),
    ("Ascendas Reit", "A17U.SI"),
    ("ComfortDelGro", "C52.SI"),
    ("SIA", "C6L.SI"),
    ("Jardine C&C", "C07.SI"),
    ("SPH", "T39.SI"),
    ("SGX", "S68.SI"),
    ("ThaiBev", "Y92.SI"),
    ("ST Engineering", "S63.SI"),
    ("Sembcorp Ind", "U96.SI"),
    ("Wilmar Intl", "F34.SI"),
    ("StarHub", "CC3.SI"),
    ("SATS", "S58.SI"),
    ("HongkongLand USD", "H78.SI"),
    ("JSH USD", "J37.SI"),
    ("JMH USD", "J36.SI"),
    ("HPH Trust USD", "NS8U.SI"),
    ("Golden Agri-Res", "E5H.SI"),
];

/// Weekday Singapore public holidays missing from the SGX trading calendar
/// (2018), ascending.
const SGX_HOLIDAYS: [(i32, u32, u32); 10] = [
    (2018, 1, 1),
    (2018, 2, 16),
    (2018, 3, 30),
    (2018, 5, 1),
    (2018, 5, 29),
    (2018, 6, 15),
    (2018, 8, 9),
    (2018, 8, 22),
    (2018, 11, 6),
    (2018, 12, 25),
];

/// The default basket, in screening order.
pub fn sti_basket() -> Vec<Instrument> {
    STI_BASKET
        .iter()
        .map(|&(name, ticker)| Instrument::new(name, ticker))
        .collect()
}

/// Exchange holidays the calendar normalizer fills in.
pub fn sgx_holidays() -> Vec<NaiveDate> {
    SGX_HOLIDAYS
        .iter()
        .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid holiday date"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn basket_has_thirty_unique_tickers() {
        let basket = sti_basket();
        assert_eq!(basket.len(), 30);

        let tickers: HashSet<_> = basket.iter().map(|i| i.ticker.as_str()).collect();
        assert_eq!(tickers.len(), 30, "tickers must be unique");
    }

    #[test]
    fn basket_order_is_stable() {
        let basket = sti_basket();
        assert_eq!(basket[0].name, "CityDev");
        assert_eq!(basket[29].name, "Golden Agri-Res");
    }

    #[test]
    fn holidays_are_ascending_and_unique() {
        let holidays = sgx_holidays();
        assert_eq!(holidays.len(), 10);
        assert!(holidays.windows(2).all(|w| w[0] < w[1]));
    }
}
