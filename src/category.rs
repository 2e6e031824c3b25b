use std::fmt;
use std::str::FromStr;

/// Category filter offered next to the search box. `All` sends an empty
/// `category` value so the API applies no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Fitness,
    Finance,
    Education,
    Entertainment,
    Productivity,
    Social,
    Games,
    Health,
    Travel,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl CategoryFilter {
    /// Display order of the category picker, "all" first.
    pub const ALL: [CategoryFilter; 10] = [
        CategoryFilter::All,
        CategoryFilter::Fitness,
        CategoryFilter::Finance,
        CategoryFilter::Education,
        CategoryFilter::Entertainment,
        CategoryFilter::Productivity,
        CategoryFilter::Social,
        CategoryFilter::Games,
        CategoryFilter::Health,
        CategoryFilter::Travel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "Tümü",
            other => other.param_value(),
        }
    }

    /// Value sent as the `category` query parameter.
    pub fn param_value(self) -> &'static str {
        match self {
            CategoryFilter::All => "",
            CategoryFilter::Fitness => "Fitness",
            CategoryFilter::Finance => "Finance",
            CategoryFilter::Education => "Education",
            CategoryFilter::Entertainment => "Entertainment",
            CategoryFilter::Productivity => "Productivity",
            CategoryFilter::Social => "Social",
            CategoryFilter::Games => "Games",
            CategoryFilter::Health => "Health",
            CategoryFilter::Travel => "Travel",
        }
    }

    pub fn is_all(self) -> bool {
        self == CategoryFilter::All
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    /// Accepts the API labels case-insensitively. Empty input, "all" and the
    /// "Tümü" label select no filter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.is_empty()
            || needle.eq_ignore_ascii_case("all")
            || needle.to_lowercase() == "tümü"
        {
            return Ok(CategoryFilter::All);
        }
        CategoryFilter::ALL
            .into_iter()
            .skip(1)
            .find(|c| c.param_value().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
