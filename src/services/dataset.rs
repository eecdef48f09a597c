//! Offline rebuild of the classes/teachers dataset.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::database::{connection::DatabaseManager, models::*};
use crate::parser::{parse_grid, ClassRecord, Grid};
use crate::utils::logging::{log_build_event, log_database_operation};

/// Known display names listed first-name-first in the teacher directory,
/// paired with the surname-first form used everywhere else.
pub const NAME_ORDER_CORRECTIONS: &[(&str, &str)] = &[
    ("Андрей В. Бажанов", "Бажанов Андрей В."),
    ("Дайсуке Котегава", "Котегава Дайсуке"),
    ("Либман Александр М.", "Либман Александр М."),
    ("Александр Мельников", "Мельников Александр"),
    ("Дороти Дж. Розенберг", "Розенберг Дороти Дж."),
    ("Джозеф Й. Уграс", "Уграс Джозеф Й."),
    ("Деан Фантаццини", "Фантаццини Деан"),
    ("Хаузвальд Роберт Б. Х.", "Хаузвальд Роберт Б. Х."),
    ("Ян Аарт Шолте", "Шолте Ян Аарт"),
];

/// Location of one group's schedule spreadsheet.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SheetAddress {
    pub doc_id: String,
    pub sheet_id: String,
}

impl SheetAddress {
    /// CSV export of this sheet under a spreadsheet service root such as
    /// `https://docs.google.com/spreadsheets`.
    pub fn export_url(&self, base_url: &str) -> String {
        format!(
            "{}/d/{}/export?format=csv&gid={}",
            base_url.trim_end_matches('/'),
            self.doc_id,
            self.sheet_id
        )
    }
}

/// Where a group's export is stored between download and parsing.
pub fn schedule_path(schedule_dir: &Path, group: &str) -> PathBuf {
    schedule_dir.join(format!("schedule_{group}.csv"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub classes: u64,
    pub teachers: u64,
    pub links: u64,
    /// Classes stored under a header that was not a date
    pub unparsed_dates: u64,
    /// Wrong-order names that were expected but not found in the directory
    pub missing_corrections: Vec<String>,
}

pub fn load_addresses(path: &Path) -> Result<BTreeMap<String, SheetAddress>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| anyhow!("Invalid addresses file {}: {}", path.display(), e))
}

/// Reads extracted teacher display names, one per line, skipping blanks.
pub fn load_teacher_names(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parses every group's exported grid from `schedule_dir/schedule_<group>.csv`.
pub fn load_group_classes(
    schedule_dir: &Path,
    addresses: &BTreeMap<String, SheetAddress>,
) -> Result<Vec<ClassRecord>> {
    let mut all_classes = Vec::new();
    for group in addresses.keys() {
        let path = schedule_path(schedule_dir, group);
        log_build_event("load schedule", &format!("{} from {}", group, path.display()));
        let grid = Grid::from_path(&path)
            .map_err(|e| anyhow!("Failed to read schedule for {}: {}", group, e))?;
        let classes = parse_grid(grid, group);
        let undated = classes.iter().filter(|c| !c.date().is_parsed()).count();
        if undated > 0 {
            tracing::warn!("BUILD: {}: {} classes under headers that are not dates", group, undated);
        }
        log_build_event("parsed schedule", &format!("{}: {} classes", group, classes.len()));
        all_classes.extend(classes);
    }
    Ok(all_classes)
}

/// Replaces each wrong-order name with its corrected form. Names that are not
/// in the list are reported back instead of failing the build.
pub fn apply_name_corrections(names: &mut [String], corrections: &[(&str, &str)]) -> Vec<String> {
    let mut missing = Vec::new();
    for (from, to) in corrections {
        match names.iter_mut().find(|name| name.as_str() == *from) {
            Some(name) => *name = (*to).to_string(),
            None => {
                tracing::warn!("BUILD: expected teacher name '{}' does not exist", from);
                missing.push((*from).to_string());
            }
        }
    }
    missing
}

/// Corrects, sorts and splits directory names into insertable rows.
pub fn prepare_teachers(mut names: Vec<String>) -> (Vec<TeacherName>, Vec<String>) {
    let missing = apply_name_corrections(&mut names, NAME_ORDER_CORRECTIONS);
    names.sort();
    let teachers = names.iter().map(|name| TeacherName::parse(name)).collect();
    (teachers, missing)
}

/// Replaces the whole dataset in one transaction: the old rows are deleted,
/// the new classes and teachers inserted and the links derived from them.
pub async fn build_dataset(
    db: &DatabaseManager,
    classes: &[ClassRecord],
    teacher_names: Vec<String>,
) -> Result<BuildReport> {
    let (teachers, missing_corrections) = prepare_teachers(teacher_names);
    let unparsed_dates = classes.iter().filter(|c| !c.date().is_parsed()).count() as u64;

    let mut tx = db.pool.begin().await?;

    for table in ["teacher_class_links", "classes", "teachers"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
        log_database_operation("DELETE", table, None);
    }
    sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('classes', 'teachers')")
        .execute(&mut *tx)
        .await?;

    let class_count = ClassSession::insert_all(&mut tx, classes).await?;
    log_database_operation("INSERT", "classes", Some(&format!("{class_count} rows")));

    let teacher_count = Teacher::insert_all(&mut tx, &teachers).await?;
    log_database_operation("INSERT", "teachers", Some(&format!("{teacher_count} rows")));

    let link_count = TeacherClassLink::derive_all(&mut tx).await?;
    log_database_operation("INSERT", "teacher_class_links", Some(&format!("{link_count} rows")));

    tx.commit().await?;

    log_build_event(
        "dataset committed",
        &format!("{class_count} classes, {teacher_count} teachers, {link_count} links"),
    );

    Ok(BuildReport {
        classes: class_count,
        teachers: teacher_count,
        links: link_count,
        unparsed_dates,
        missing_corrections,
    })
}
