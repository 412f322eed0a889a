use std::{fmt, fs, path::Path, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Identity printed in authorship banners and footers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolInfo {
    pub teacher: String,
    pub school: String,
    pub location: String,
    /// platform title, first heading of the Word export
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
}

/// External configuration data: who is teaching and what can be taught.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub school: SchoolInfo,
    pub subjects: Vec<Subject>,
}

impl Profile {
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }
}

impl Default for Profile {
    fn default() -> Self {
        let subjects = [
            ("arabic", "اللغة العربية"),
            ("math", "الرياضيات"),
            ("physics", "الفيزياء"),
            ("chemistry", "الكيمياء"),
            ("biology", "الأحياء"),
            ("tech", "التكنولوجيا"),
            ("english", "اللغة الإنجليزية"),
            ("history", "الدراسات التاريخية"),
            ("geo", "الجغرافيا"),
            ("religion", "التربية الإسلامية"),
        ]
        .into_iter()
        .map(|(id, name)| Subject {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        Self {
            school: SchoolInfo {
                teacher: "رانية شريم".to_string(),
                school: "مدرسة بنات عمر بن عبد العزيز الثانوية".to_string(),
                location: "فلسطين - طولكرم".to_string(),
                title: "منصة أنشطة تعليمية للصف العاشر".to_string(),
            },
            subjects,
        }
    }
}

pub fn load_profile(path: &Path) -> anyhow::Result<Profile> {
    let content = fs::read_to_string(path)
        .context(format!("failed to read profile {}", path.display()))?;
    let profile: Profile = serde_yaml_ng::from_str(&content)
        .context(format!("profile {} is not valid", path.display()))?;

    if profile.subjects.is_empty() {
        return Err(anyhow::anyhow!(
            "profile {} must list at least one subject",
            path.display()
        ));
    }

    Ok(profile)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Semester {
    #[default]
    #[serde(rename = "الأول")]
    First,
    #[serde(rename = "الثاني")]
    Second,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::First => "الأول",
            Semester::Second => "الثاني",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "first" | "الأول" => Ok(Semester::First),
            "2" | "second" | "الثاني" => Ok(Semester::Second),
            other => Err(anyhow::anyhow!("unknown semester '{}', expected 1 or 2", other)),
        }
    }
}
