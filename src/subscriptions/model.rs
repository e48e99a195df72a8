use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recurrence unit for a subscription charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl BillingCycle {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A tracked recurring subscription.
///
/// Serialized with camelCase field names; this is the shape persisted under
/// [`SUBSCRIPTION_STORAGE_KEY`](super::SUBSCRIPTION_STORAGE_KEY) as a JSON
/// array. `next_payment_date` is a calendar date (`YYYY-MM-DD`), never an
/// instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<BillingCycle>,
    /// Preferred day-of-month for monthly cycles (1..=31).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_next_payment: Option<bool>,
}

/// Input for adding a subscription; the store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct NewSubscription {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub domain: String,
    pub icon: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub payment_day: Option<u32>,
    pub next_payment_date: Option<NaiveDate>,
    pub show_next_payment: Option<bool>,
}

impl NewSubscription {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: f64,
        currency: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            currency: currency.into(),
            domain: domain.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn billing_cycle(mut self, cycle: BillingCycle) -> Self {
        self.billing_cycle = Some(cycle);
        self
    }

    #[must_use]
    pub fn payment_day(mut self, day: u32) -> Self {
        self.payment_day = Some(day);
        self
    }
}

/// Partial update applied to an existing subscription.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub domain: Option<String>,
    pub icon: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub payment_day: Option<u32>,
    pub next_payment_date: Option<NaiveDate>,
    pub show_next_payment: Option<bool>,
}
