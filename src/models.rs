//! Typed payloads for every backend endpoint.
//!
//! Responses are decoded straight into these types, so a malformed body fails at the
//! client boundary with `ApiError::Decode` rather than leaking missing fields into views.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERIOD: &str = "Monthly";

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// Category name. Not checked against existing budgets.
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<NewTransaction> for TransactionPatch {
    fn from(tx: NewTransaction) -> Self {
        Self {
            date: Some(tx.date),
            title: Some(tx.title),
            kind: Some(tx.kind),
            amount: Some(tx.amount),
            category: Some(tx.category),
            notes: tx.notes,
        }
    }
}

/// A budget bucket as held by `CategoryStore`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "budgetLimit")]
    pub budget_limit: Decimal,
    /// May exceed `budget_limit`; that is an overspend, not an error.
    #[serde(default)]
    pub spent: Decimal,
    pub color: String,
    #[serde(default = "default_period")]
    pub period: String,
}

impl Category {
    pub fn is_overspent(&self) -> bool {
        self.spent > self.budget_limit
    }
}

/// Fields supplied when creating a category; the rest are assigned.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "budgetLimit")]
    pub budget_limit: Decimal,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// Partial update, used for both local store merges and `PUT /budgets/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "budgetLimit", skip_serializing_if = "Option::is_none")]
    pub budget_limit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl CategoryPatch {
    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(limit) = self.budget_limit {
            category.budget_limit = limit;
        }
        if let Some(spent) = self.spent {
            category.spent = spent;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
        if let Some(period) = self.period {
            category.period = period;
        }
    }
}

/// Budget record as served by `GET /budgets`, with server-computed totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub name: String,
    #[serde(rename = "budgetLimit")]
    pub budget_limit: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default)]
    pub income: Decimal,
    /// `budget_limit + income - spent`, computed by the server.
    #[serde(default)]
    pub remaining: Decimal,
    pub color: String,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<Budget> for Category {
    fn from(b: Budget) -> Self {
        Category {
            id: b.id,
            name: b.name,
            budget_limit: b.budget_limit,
            spent: b.spent,
            color: b.color,
            period: b.period,
        }
    }
}

/// Lightweight `{name, color}` row for selectors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub name: String,
    pub color: String,
}

/// One slice of the spending-by-category chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSlice {
    pub name: String,
    pub value: Decimal,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_budget: Decimal,
    pub remaining_budget: Decimal,
    pub net_income: Decimal,
    pub transaction_count: u32,
    pub budget_count: u32,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub budget_alerts: bool,
    pub monthly_reports: bool,
    pub transaction_updates: bool,
    pub security_alerts: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    BudgetAlerts,
    MonthlyReports,
    TransactionUpdates,
    SecurityAlerts,
}

impl NotificationPrefs {
    pub fn is_on(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::BudgetAlerts => self.budget_alerts,
            NotificationKind::MonthlyReports => self.monthly_reports,
            NotificationKind::TransactionUpdates => self.transaction_updates,
            NotificationKind::SecurityAlerts => self.security_alerts,
        }
    }

    /// Copy with one flag flipped.
    pub fn toggled(&self, kind: NotificationKind) -> Self {
        let mut next = self.clone();
        let flag = match kind {
            NotificationKind::BudgetAlerts => &mut next.budget_alerts,
            NotificationKind::MonthlyReports => &mut next.monthly_reports,
            NotificationKind::TransactionUpdates => &mut next.transaction_updates,
            NotificationKind::SecurityAlerts => &mut next.security_alerts,
        };
        *flag = !*flag;
        next
    }
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            budget_alerts: true,
            monthly_reports: true,
            transaction_updates: false,
            security_alerts: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub notifications: NotificationPrefs,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NotificationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_alerts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_reports: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_updates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_alerts: Option<bool>,
}

impl From<&NotificationPrefs> for NotificationUpdate {
    fn from(p: &NotificationPrefs) -> Self {
        Self {
            budget_alerts: Some(p.budget_alerts),
            monthly_reports: Some(p.monthly_reports),
            transaction_updates: Some(p.transaction_updates),
            security_alerts: Some(p.security_alerts),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// `PUT /settings` reply. Servers that only acknowledge send no `user`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SettingsReply {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Bodies like `{"message": "Transaction deleted successfully"}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    pub transactions: Vec<Transaction>,
    pub income: Decimal,
    pub expenses: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl FinancialSnapshot {
    /// Totals income and expense amounts from `transactions`.
    pub fn from_transactions(transactions: Vec<Transaction>, question: Option<String>) -> Self {
        let (income, expenses) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), tx| match tx.kind {
                TransactionKind::Income => (income + tx.amount, expenses),
                TransactionKind::Expense => (income, expenses + tx.amount),
            },
        );
        Self {
            transactions,
            income,
            expenses,
            question,
        }
    }
}

/// Expense totals keyed by the category name on each transaction, largest first.
/// Names with no matching budget are kept as-is.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for tx in transactions.iter().filter(|tx| tx.kind == TransactionKind::Expense) {
        match totals.iter_mut().find(|(name, _)| *name == tx.category) {
            Some((_, total)) => *total += tx.amount,
            None => totals.push((tx.category.clone(), tx.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnalysisSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub transaction_count: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Analysis {
    pub analysis: String,
    pub summary: AnalysisSummary,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub ollama_available: bool,
    #[serde(default)]
    pub model: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
