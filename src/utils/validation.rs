use anyhow::{anyhow, Result};

/// Longest surname input accepted from a user.
pub const MAX_SURNAME_LENGTH: usize = 100;

/// Checks a surname typed by a user and returns it trimmed.
pub fn validate_surname(input: &str) -> Result<String> {
    let surname = input.trim();

    if surname.is_empty() {
        return Err(anyhow!("Фамилия не может быть пустой"));
    }

    if surname.chars().count() > MAX_SURNAME_LENGTH {
        return Err(anyhow!(
            "Фамилия не может быть длиннее {} символов",
            MAX_SURNAME_LENGTH
        ));
    }

    if surname.contains('\n') || surname.contains('\r') {
        return Err(anyhow!("Нужно ввести одну фамилию в одной строке"));
    }

    if surname.starts_with('/') {
        return Err(anyhow!("Ожидалась фамилия, а не команда"));
    }

    Ok(surname.to_string())
}
