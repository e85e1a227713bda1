//! Seed configuration and fixed seed data.

/// Email domain of every seeded teacher; `clear-seed` deletes by it.
pub const SEED_EMAIL_DOMAIN: &str = "seed.classgrid.dev";

/// Password of every seeded teacher.
pub const SEED_PASSWORD: &str = "password123";

pub const SEED_SUBJECTS: &[&str] = &[
    "Matemática",
    "Português",
    "História",
    "Geografia",
    "Ciências",
    "Inglês",
    "Artes",
    "Educação Física",
];

pub const SEED_ROOMS: &[(&str, u32)] = &[
    ("Sala 101", 35),
    ("Sala 102", 35),
    ("Sala 103", 30),
    ("Sala 201", 40),
    ("Sala 202", 40),
    ("Laboratório", 24),
    ("Quadra", 60),
];

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub teachers: usize,
    pub assignments_per_teacher: usize,
}

impl SeedConfig {
    pub fn new(teachers: usize) -> Self {
        Self {
            teachers,
            assignments_per_teacher: 8,
        }
    }

    pub fn with_assignments(mut self, per_teacher: usize) -> Self {
        self.assignments_per_teacher = per_teacher;
        self
    }
}

/// What a seeding run wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub subjects: usize,
    pub rooms: usize,
    pub teachers: usize,
    pub assignments: usize,
}

/// What `clear_seed` removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClearSummary {
    pub teachers: usize,
    pub assignments: usize,
    pub subjects: usize,
    pub rooms: usize,
}
