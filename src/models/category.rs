#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    DailyGoods,
    Leisure,
    Other,
}

/// Payee choice offered for a category. `FreeText` is the escape hatch that
/// lets the user type a payee not in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayeeOption {
    Named(&'static str),
    FreeText,
}

impl PayeeOption {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Named(name) => name,
            Self::FreeText => "Other (type a payee)",
        }
    }
}

const FOOD_PAYEES: &[PayeeOption] = &[
    PayeeOption::Named("業務スーパー"),
    PayeeOption::Named("オーケーストア"),
    PayeeOption::Named("たまや"),
    PayeeOption::Named("ロピア"),
    PayeeOption::Named("ライフ"),
    PayeeOption::FreeText,
];

const DAILY_GOODS_PAYEES: &[PayeeOption] = &[
    PayeeOption::Named("HAC"),
    PayeeOption::Named("サンドラッグ"),
    PayeeOption::FreeText,
];

const LEISURE_PAYEES: &[PayeeOption] = &[
    PayeeOption::Named("セブンイレブン"),
    PayeeOption::Named("ローソン"),
    PayeeOption::Named("ファミリーマート"),
    PayeeOption::FreeText,
];

const OTHER_PAYEES: &[PayeeOption] = &[PayeeOption::FreeText];

impl Category {
    /// Label written to and read from the ledger sheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "食費",
            Self::DailyGoods => "日用品",
            Self::Leisure => "嗜好品",
            Self::Other => "その他",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::DailyGoods => "Daily goods",
            Self::Leisure => "Leisure",
            Self::Other => "Other",
        }
    }

    /// Accepts the sheet label or the English name (case-insensitive,
    /// `-`/`_`/space agnostic).
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if let Some(cat) = Self::all().iter().find(|c| c.as_str() == trimmed) {
            return Some(*cat);
        }
        let key: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "food" => Some(Self::Food),
            "dailygoods" | "goods" => Some(Self::DailyGoods),
            "leisure" => Some(Self::Leisure),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[Self::Food, Self::DailyGoods, Self::Leisure, Self::Other]
    }

    /// Ordered payee choices for the category. Every list ends with
    /// `PayeeOption::FreeText`.
    pub fn payees(&self) -> &'static [PayeeOption] {
        match self {
            Self::Food => FOOD_PAYEES,
            Self::DailyGoods => DAILY_GOODS_PAYEES,
            Self::Leisure => LEISURE_PAYEES,
            Self::Other => OTHER_PAYEES,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
