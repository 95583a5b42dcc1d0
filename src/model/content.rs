//! Portfolio content: profiles, career history, education and skills

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which of the two profiles an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    Developer,
    MedicalRepresentative,
}

impl ProfileKind {
    pub fn all() -> [ProfileKind; 2] {
        [ProfileKind::Developer, ProfileKind::MedicalRepresentative]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileKind::Developer => "Software Developer",
            ProfileKind::MedicalRepresentative => "Medical Representative",
        }
    }

    /// Path segment used by navigation
    pub fn slug(&self) -> &'static str {
        match self {
            ProfileKind::Developer => "developer",
            ProfileKind::MedicalRepresentative => "medical-representative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub kind: ProfileKind,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub role: String,
    pub profiles: Vec<ProfileKind>,
    pub start: NaiveDate,
    /// `None` while still employed
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Company {
    pub fn is_current(&self) -> bool {
        self.end.is_none()
    }

    /// Whole months between start and end (or `today`)
    pub fn tenure_months(&self, today: NaiveDate) -> u32 {
        months_between(self.start, self.end.unwrap_or(today))
    }

    /// e.g. "Mar 2019 – Present"
    pub fn period(&self) -> String {
        format_period(self.start, self.end)
    }

    /// e.g. "4 yrs 2 mos"
    pub fn formatted_tenure(&self, today: NaiveDate) -> String {
        format_months(self.tenure_months(today))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    pub profiles: Vec<ProfileKind>,
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl Education {
    pub fn period(&self) -> String {
        format_period(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechSkill {
    pub name: String,
    pub category: String,
    /// Proficiency, 1 (familiar) to 5 (expert)
    #[serde(default = "default_level")]
    pub level: u8,
}

fn default_level() -> u8 {
    3
}

impl TechSkill {
    pub const MAX_LEVEL: u8 = 5;

    pub fn clamped_level(&self) -> u8 {
        self.level.clamp(1, Self::MAX_LEVEL)
    }

    /// Bar such as "■■■□□"
    pub fn level_bar(&self) -> String {
        let level = self.clamped_level() as usize;
        format!(
            "{}{}",
            "■".repeat(level),
            "□".repeat(Self::MAX_LEVEL as usize - level)
        )
    }
}

/// Everything the portfolio renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContent {
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub tech_stack: Vec<TechSkill>,
}

impl PortfolioContent {
    pub fn profile(&self, kind: ProfileKind) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.kind == kind)
    }

    /// Companies for `kind`, most recent first
    pub fn companies_for(&self, kind: ProfileKind) -> Vec<&Company> {
        let mut companies: Vec<&Company> = self
            .companies
            .iter()
            .filter(|c| c.profiles.contains(&kind))
            .collect();
        companies.sort_by(|a, b| b.start.cmp(&a.start));
        companies
    }

    /// Education entries for `kind`, most recent first
    pub fn education_for(&self, kind: ProfileKind) -> Vec<&Education> {
        let mut entries: Vec<&Education> = self
            .education
            .iter()
            .filter(|e| e.profiles.contains(&kind))
            .collect();
        entries.sort_by(|a, b| b.start.cmp(&a.start));
        entries
    }

    /// Only the developer profile shows a tech stack
    pub fn tech_stack_for(&self, kind: ProfileKind) -> &[TechSkill] {
        match kind {
            ProfileKind::Developer => &self.tech_stack,
            ProfileKind::MedicalRepresentative => &[],
        }
    }
}

fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let months = if end.day() < start.day() { months - 1 } else { months };
    months.max(0) as u32
}

fn format_months(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    let unit = |n: u32, one: &str, many: &str| format!("{} {}", n, if n == 1 { one } else { many });
    match (years, rest) {
        (0, 0) => "< 1 mo".to_string(),
        (0, m) => unit(m, "mo", "mos"),
        (y, 0) => unit(y, "yr", "yrs"),
        (y, m) => format!("{} {}", unit(y, "yr", "yrs"), unit(m, "mo", "mos")),
    }
}

fn format_period(start: NaiveDate, end: Option<NaiveDate>) -> String {
    let end = end
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| "Present".to_string());
    format!("{} – {}", start.format("%b %Y"), end)
}
