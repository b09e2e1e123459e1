use rust_decimal::{Decimal, RoundingStrategy};
use url::form_urlencoded;

const VENMO_PAY_URI: &str = "venmo://paycharge";

/// Build a Venmo payment deep link.
///
/// `amount` is always written with two decimals and `note` is
/// form-urlencoded. `recipients` is only present when a non-empty
/// username is given.
///
/// # Examples
///
/// ```
/// use golf_settle::settlement::venmo::venmo_deep_link;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     venmo_deep_link(dec!(6), "Skins week 3", Some("jake-fraser")),
///     "venmo://paycharge?txn=pay&amount=6.00&note=Skins+week+3&recipients=jake-fraser"
/// );
/// ```
pub fn venmo_deep_link(amount: Decimal, note: &str, recipient_username: Option<&str>) -> String {
    let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("txn", "pay")
        .append_pair("amount", &format!("{:.2}", amount))
        .append_pair("note", note);
    if let Some(recipient) = recipient_username.filter(|r| !r.is_empty()) {
        query.append_pair("recipients", recipient);
    }

    format!("{}?{}", VENMO_PAY_URI, query.finish())
}
