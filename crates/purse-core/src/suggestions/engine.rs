//! Rule evaluation for spending suggestions
//!
//! Rules run in a fixed order and each may contribute one paragraph:
//! 1. Zero income short-circuits with a single message
//! 2. Spending ratio (high / moderate / healthy, exactly one)
//! 3. Top category share, then food and transport shares
//! 4. Surplus or overspending
//! 5. Monthly summary (always)

use tracing::debug;

use crate::models::CategoryAmount;

use super::SuggestionInput;

/// Currency symbol used when none is configured
pub const DEFAULT_CURRENCY: &str = "₹";

/// Returned as-is when there is no income to compare against
pub const NO_INCOME_MESSAGE: &str =
    "No income data available. Start logging your income to get personalized suggestions.";

const HIGH_SPENDING_PERCENT: f64 = 80.0;
const MODERATE_SPENDING_PERCENT: f64 = 60.0;
const TOP_CATEGORY_PERCENT: f64 = 40.0;
const FOOD_PERCENT: f64 = 30.0;
const TRANSPORT_PERCENT: f64 = 15.0;
const SURPLUS_FRACTION: f64 = 0.3;

const FOOD_KEYWORDS: &[&str] = &["food"];
const TRANSPORT_KEYWORDS: &[&str] = &["transport", "metro", "bus"];

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Generate suggestions with the default currency symbol
pub fn generate_suggestions(
    monthly_expense: f64,
    monthly_income: f64,
    category_breakdown: &[CategoryAmount],
) -> String {
    SuggestionEngine::default().suggest(monthly_expense, monthly_income, category_breakdown)
}

/// Stateless rule engine; the only setting is how amounts are labelled
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    currency_symbol: String,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl SuggestionEngine {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn generate(&self, input: &SuggestionInput) -> String {
        self.suggest(
            input.monthly_expense,
            input.monthly_income,
            &input.category_breakdown,
        )
    }

    pub fn suggest(
        &self,
        monthly_expense: f64,
        monthly_income: f64,
        category_breakdown: &[CategoryAmount],
    ) -> String {
        if monthly_income == 0.0 {
            return NO_INCOME_MESSAGE.to_string();
        }

        let mut paragraphs = vec![spending_ratio_message(monthly_expense, monthly_income)];

        if let Some(top) = category_breakdown.first() {
            if let Some(share) = share_of(top.amount, monthly_expense) {
                if share > TOP_CATEGORY_PERCENT {
                    paragraphs.push(format!(
                        "💡 Your highest spending category is '{}' at {:.1}% of expenses. \
                         Consider reducing this or finding alternatives.",
                        top.category, share
                    ));
                }
            }

            if category_breakdown.len() >= 2 {
                if let Some(food) = first_matching(category_breakdown, FOOD_KEYWORDS) {
                    if exceeds_share(food.amount, monthly_expense, FOOD_PERCENT) {
                        paragraphs.push(format!(
                            "🍽️ Food spending is high at {}. \
                             Try meal planning or cooking at home more often.",
                            self.money(food.amount)
                        ));
                    }
                }

                if let Some(transport) = first_matching(category_breakdown, TRANSPORT_KEYWORDS) {
                    if exceeds_share(transport.amount, monthly_expense, TRANSPORT_PERCENT) {
                        paragraphs.push(format!(
                            "🚗 Transport costs are significant at {}. \
                             Consider carpooling or using public transport more.",
                            self.money(transport.amount)
                        ));
                    }
                }
            }
        }

        let surplus = monthly_income - monthly_expense;
        if surplus > monthly_income * SURPLUS_FRACTION {
            paragraphs.push(format!(
                "🎯 You have surplus funds! Consider saving or investing {} for emergencies.",
                self.money(surplus)
            ));
        } else if surplus < 0.0 {
            paragraphs.push(
                "⛔ Warning: You're spending more than you earn! This is not sustainable. \
                 Please review your expenses immediately."
                    .to_string(),
            );
        }

        paragraphs.push(format!(
            "💰 Monthly Summary: Income {} | Expenses {} | Balance {}",
            self.money(monthly_income),
            self.money(monthly_expense),
            self.money(surplus)
        ));

        debug!(
            paragraphs = paragraphs.len(),
            categories = category_breakdown.len(),
            "Generated spending suggestions"
        );

        paragraphs.join(PARAGRAPH_SEPARATOR)
    }

    fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

fn spending_ratio_message(monthly_expense: f64, monthly_income: f64) -> String {
    let ratio = monthly_expense / monthly_income * 100.0;

    if ratio > HIGH_SPENDING_PERCENT {
        format!(
            "⚠️ Your spending is very high - you're spending {:.1}% of your income. \
             Consider creating a budget and cutting back on non-essential expenses.",
            ratio
        )
    } else if ratio > MODERATE_SPENDING_PERCENT {
        format!(
            "Your spending is moderate at {:.1}% of income. Try to aim for 50% or less.",
            ratio
        )
    } else {
        format!(
            "Great! Your spending is healthy at {:.1}% of income. Keep it up!",
            ratio
        )
    }
}

/// Percentage of `total` taken by `amount`; `None` when it isn't a finite number
fn share_of(amount: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        return None;
    }
    let share = amount / total * 100.0;
    share.is_finite().then_some(share)
}

fn exceeds_share(amount: f64, total: f64, threshold: f64) -> bool {
    share_of(amount, total).is_some_and(|share| share > threshold)
}

/// First category whose lowercased name contains any keyword.
///
/// Only the first hit is considered, even if a later one would cross a threshold.
fn first_matching<'a>(
    breakdown: &'a [CategoryAmount],
    keywords: &[&str],
) -> Option<&'a CategoryAmount> {
    breakdown.iter().find(|entry| {
        let name = entry.category.to_lowercase();
        keywords.iter().any(|keyword| name.contains(keyword))
    })
}
