//! Built-in default subscriptions used to seed first-run state.

use super::model::Subscription;

/// The canonical default subscription list.
///
/// Served whenever no persisted list exists yet (or the persisted list is
/// empty), so the first-run experience is pre-populated rather than blank.
#[must_use]
pub fn default_subscriptions() -> Vec<Subscription> {
    [
        ("1", "Netflix", 15.99, "USD", "https://netflix.com"),
        ("2", "Spotify", 9.99, "USD", "https://spotify.com"),
        ("3", "Amazon Prime", 14.99, "USD", "https://amazon.com"),
        ("4", "Disney+", 7.99, "USD", "https://disneyplus.com"),
        ("5", "YouTube Premium", 11.99, "USD", "https://youtube.com"),
        ("6", "Hulu", 7.99, "USD", "https://hulu.com"),
        ("7", "Apple Music", 9.99, "JPY", "https://apple.com/apple-music"),
        ("8", "HBO Max", 14.99, "JPY", "https://hbomax.com"),
        ("9", "Adobe Creative Cloud", 52.99, "EUR", "https://adobe.com"),
        ("10", "Microsoft 365", 6.99, "EUR", "https://microsoft.com"),
    ]
    .into_iter()
    .map(|(id, name, price, currency, domain)| Subscription {
        id: id.to_string(),
        name: name.to_string(),
        price,
        currency: currency.to_string(),
        domain: domain.to_string(),
        icon: None,
        billing_cycle: None,
        payment_day: None,
        next_payment_date: None,
        show_next_payment: None,
    })
    .collect()
}
