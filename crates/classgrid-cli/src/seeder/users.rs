//! Teacher seeding.
//!
//! Teachers get fake Brazilian names, a unique email under
//! [`SEED_EMAIL_DOMAIN`] and a random CPF with valid check digits.

use chrono::Utc;
use classgrid_core::cpf;
use classgrid_db::DocumentStore;
use classgrid_db::collections::USERS;
use classgrid_models::{Cpf, Email, Role, User, UserId, UserRecord, ValueTypeError};
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::PT_BR;
use rand::Rng;
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

use super::models::SEED_EMAIL_DOMAIN;
use crate::CliResult;

/// A random CPF with valid check digits.
pub fn random_cpf<R: Rng + ?Sized>(rng: &mut R) -> Cpf {
    loop {
        let mut base = [0u8; cpf::BASE_LENGTH];
        for digit in base.iter_mut() {
            *digit = rng.gen_range(0..10);
        }
        // repeated-digit numbers never validate
        if let Ok(cpf) = Cpf::new(cpf::complete(base)) {
            return cpf;
        }
    }
}

/// Generates `count` teacher records sharing one password hash.
pub fn generate_teachers(
    count: usize,
    password_hash: &str,
) -> Result<Vec<UserRecord>, ValueTypeError> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_teacher(idx, password_hash))
        .collect()
}

fn generate_teacher(idx: usize, password_hash: &str) -> Result<UserRecord, ValueTypeError> {
    let first_name: String = FirstName(PT_BR).fake();
    let last_name: String = LastName(PT_BR).fake();

    let email = Email::new(format!(
        "{}.{}+teacher{}@{}",
        ascii_slug(&first_name),
        ascii_slug(&last_name),
        idx,
        SEED_EMAIL_DOMAIN
    ))?;

    let now = Utc::now();
    Ok(UserRecord {
        user: User {
            id: UserId::new(),
            name: format!("{} {}", first_name, last_name),
            email,
            cpf: random_cpf(&mut rand::thread_rng()),
            role: Role::Teacher,
            created_at: now,
            updated_at: now,
        },
        password_hash: password_hash.to_string(),
    })
}

/// Lowercase ASCII letters of `name`, accents dropped.
fn ascii_slug(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => Some('a'),
            'é' | 'ê' | 'É' | 'Ê' => Some('e'),
            'í' | 'Í' => Some('i'),
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => Some('o'),
            'ú' | 'ü' | 'Ú' | 'Ü' => Some('u'),
            'ç' | 'Ç' => Some('c'),
            c if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

/// Generates and stores `count` teachers. CPFs already in use are redrawn.
pub async fn seed_teachers(
    store: &dyn DocumentStore,
    count: usize,
    password_hash: &str,
) -> CliResult<Vec<User>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers...", count);

    let mut taken: HashSet<String> = USERS
        .all(store)
        .await?
        .into_iter()
        .map(|r| r.user.cpf.into_inner())
        .collect();

    let mut teachers = Vec::with_capacity(count);
    for mut record in generate_teachers(count, password_hash)? {
        while !taken.insert(record.user.cpf.as_str().to_string()) {
            record.user.cpf = random_cpf(&mut rand::thread_rng());
        }
        USERS.put(store, &record.user.id.key(), &record).await?;
        teachers.push(record.user);
    }

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        teachers.len(),
        start_time.elapsed()
    );
    Ok(teachers)
}
