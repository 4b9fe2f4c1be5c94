use std::fmt::{self, Display, Formatter};

use rand::{Rng, RngCore};

use super::primitives::pick;

/// Word lists available to `dict` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dictionary {
    FirstName,
    LastName,
    FullName,
    City,
    Country,
    Company,
    Email,
    Color,
}

impl Dictionary {
    pub const ALL: [Dictionary; 8] = [
        Dictionary::FirstName,
        Dictionary::LastName,
        Dictionary::FullName,
        Dictionary::City,
        Dictionary::Country,
        Dictionary::Company,
        Dictionary::Email,
        Dictionary::Color,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dictionary| dictionary.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dictionary::FirstName => "first_name",
            Dictionary::LastName => "last_name",
            Dictionary::FullName => "full_name",
            Dictionary::City => "city",
            Dictionary::Country => "country",
            Dictionary::Company => "company",
            Dictionary::Email => "email",
            Dictionary::Color => "color",
        }
    }

    pub fn pick(&self, rng: &mut dyn RngCore) -> String {
        match self {
            Dictionary::FirstName => pick(FIRST_NAMES, rng).to_string(),
            Dictionary::LastName => pick(LAST_NAMES, rng).to_string(),
            Dictionary::FullName => {
                let first = pick(FIRST_NAMES, rng);
                let last = pick(LAST_NAMES, rng);
                format!("{first} {last}")
            }
            Dictionary::City => pick(CITIES, rng).to_string(),
            Dictionary::Country => pick(COUNTRIES, rng).to_string(),
            Dictionary::Company => pick(COMPANIES, rng).to_string(),
            Dictionary::Email => {
                let user = pick(FIRST_NAMES, rng).to_lowercase();
                let number = rng.random_range(1..=9999);
                let domain = pick(EMAIL_DOMAINS, rng);
                format!("{user}{number:04}@{domain}")
            }
            Dictionary::Color => pick(COLORS, rng).to_string(),
        }
    }
}

impl Display for Dictionary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carlos", "Daniela", "Eduardo", "Fernanda", "Gustavo", "Helena", "Ivan",
    "Julia", "Kevin", "Laura", "Marcos", "Nina", "Otto", "Paula",
];

const LAST_NAMES: &[&str] = &[
    "Silva", "Santos", "Oliveira", "Souza", "Lima", "Costa", "Ribeiro", "Almeida", "Smith",
    "Johnson", "Brown", "Garcia", "Miller", "Davis", "Wilson", "Moore",
];

const CITIES: &[&str] = &[
    "Lisbon", "Porto", "Madrid", "Chicago", "Toronto", "Recife", "Curitiba", "Pune", "Osaka",
    "Lyon", "Leeds", "Denver",
];

const COUNTRIES: &[&str] = &[
    "Brazil", "Canada", "France", "Germany", "India", "Japan", "Portugal", "Spain",
    "United Kingdom", "United States",
];

const COMPANIES: &[&str] = &[
    "Acme Corp", "Globex", "Initech", "Umbrella", "Hooli", "Vandelay Industries", "Stark Labs",
    "Wayne Holdings",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const COLORS: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "indigo", "violet", "black", "white", "gray",
];
