use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use super::docx::{Document, ExportError, HeadingLevel, Paragraph, Run};
use super::filename::export_file_name;
use super::print::attribution;
use crate::activity::ActivityContent;
use crate::school::SchoolInfo;

const SECTION_GAP: u32 = 400;
const ITEM_GAP: u32 = 200;

fn section_heading(text: &str, before: u32) -> Paragraph {
    Paragraph::new(Run::plain(text).bold()).before(before)
}

fn bullet(marker: &str, text: &str) -> Paragraph {
    Paragraph::text(format!("{} {}", marker, text))
}

/// Builds the document tree for an activity. Same input, equal tree.
pub fn render_document(activity: &ActivityContent, school: &SchoolInfo) -> Document {
    let mut doc = Document::default();

    doc.push(
        Paragraph::text(school.title.as_str())
            .heading(HeadingLevel::Heading1)
            .centered(),
    );
    doc.push(
        Paragraph::new(Run::plain(format!("إعداد المعلمة: {}", school.teacher)).bold()).centered(),
    );
    doc.push(
        Paragraph::text(format!("{} - {}", school.school, school.location))
            .centered()
            .after(SECTION_GAP),
    );
    doc.push(
        Paragraph::text(format!("خطة نشاط صفي تفاعلي: {}", activity.title))
            .heading(HeadingLevel::Heading2),
    );
    doc.push(Paragraph::text(format!(
        "المبحث: {} | الفصل: {}",
        activity.subject, activity.semester
    )));
    doc.push(Paragraph::text("-".repeat(50)).centered());

    doc.push(Paragraph::new(Run::plain("الهدف من النشاط:").bold()));
    doc.push(Paragraph::text(activity.objective.as_str()));

    if !activity.tools().is_empty() {
        doc.push(section_heading("الأدوات اللازمة:", ITEM_GAP));
        for tool in activity.tools() {
            doc.push(bullet("•", tool));
        }
    }

    if !activity.procedure().is_empty() {
        doc.push(section_heading("خطوات تنفيذ النشاط:", ITEM_GAP));
        for (index, step) in activity.procedure().iter().enumerate() {
            doc.push(bullet(&format!("{}.", index + 1), step));
        }
    }

    doc.push(section_heading("الأنشطة التفاعلية:", SECTION_GAP));
    for card in &activity.interactive_activities {
        doc.push(
            Paragraph::new(
                Run::plain(format!(
                    "نشاط [{}]: {}",
                    card.activity_type.label(),
                    card.title
                ))
                .bold()
                .italic(),
            )
            .before(ITEM_GAP),
        );
        doc.push(Paragraph::text(card.description.as_str()));
        for instruction in &card.instructions {
            doc.push(bullet("-", instruction));
        }
    }

    let game = &activity.competitive_game;
    doc.push(section_heading("اللعبة التنافسية الكبرى:", SECTION_GAP));
    doc.push(Paragraph::text(format!("اسم اللعبة: {}", game.name)));
    doc.push(Paragraph::text(format!(
        "الشكل المقترح: {}",
        game.suggested_format
    )));
    for rule in &game.rules {
        doc.push(bullet("•", rule));
    }

    if !activity.links().is_empty() {
        doc.push(section_heading(
            "الموارد الرقمية والأنشطة التفاعلية:",
            SECTION_GAP,
        ));
        for link in activity.links() {
            doc.push(Paragraph::new(
                Run::plain(format!("{} ({}):", link.platform, link.tool_type.as_str())).bold(),
            ));
            doc.push(Paragraph::text(link.description.as_str()));
            doc.push(
                Paragraph::new(
                    Run::plain(format!("الارتباط بالهدف: {}", link.link_to_objective)).italic(),
                )
                .after(ITEM_GAP),
            );
        }
    }

    doc.push(section_heading("بصمة المعلمة والخلاصة:", SECTION_GAP));
    doc.push(Paragraph::new(
        Run::plain(activity.conclusion.as_str()).italic(),
    ));

    doc.push(
        Paragraph::text(attribution(school))
            .centered()
            .before(SECTION_GAP),
    );

    doc
}

/// Packs the activity and saves it as `activity_<title>.docx` in `dir`.
///
/// The file appears only once fully written.
pub fn export_to_word(
    activity: &ActivityContent,
    school: &SchoolInfo,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = render_document(activity, school).to_bytes()?;
    let path = dir.join(export_file_name(&activity.title, "docx"));

    std::fs::create_dir_all(dir)?;
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(&path).map_err(|e| e.error)?;

    info!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::tests::sample_activity;
    use crate::school::Profile;

    fn school() -> SchoolInfo {
        Profile::default().school
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.paragraphs.iter().map(|p| p.plain_text()).collect()
    }

    #[test]
    fn follows_section_order() {
        let texts = texts(&render_document(&sample_activity(), &school()));
        let position = |needle: &str| {
            texts
                .iter()
                .position(|t| t.contains(needle))
                .unwrap_or_else(|| panic!("'{}' missing", needle))
        };

        let order = [
            position("منصة أنشطة تعليمية للصف العاشر"),
            position("خطة نشاط صفي تفاعلي: الكسور العشرية"),
            position("الهدف من النشاط:"),
            position("• بطاقات ملونة"),
            position("1. تقسيم المجموعات"),
            position("نشاط [جماعي]: سباق الكسور"),
            position("- اقرئي البطاقة"),
            position("اسم اللعبة: تحدي الأرقام"),
            position("Wordwall (لعبة تعليمية):"),
            position("الارتباط بالهدف: تعزز المقارنة"),
            position("الكسور في حياتنا اليومية"),
            position("تم الإنشاء بواسطة"),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{:?}", order);
    }

    #[test]
    fn emphasis_runs() {
        let doc = render_document(&sample_activity(), &school());
        let find = |needle: &str| {
            doc.paragraphs
                .iter()
                .find(|p| p.plain_text().contains(needle))
                .unwrap()
        };

        assert!(find("الهدف من النشاط:").runs[0].bold);
        assert!(find("الارتباط بالهدف").runs[0].italic);
        assert!(find("الكسور في حياتنا اليومية").runs[0].italic);
        assert_eq!(
            find("منصة أنشطة").heading,
            Some(HeadingLevel::Heading1)
        );
    }

    #[test]
    fn omits_empty_optional_sections() {
        let mut activity = sample_activity();
        activity.tools_needed = None;
        activity.steps = Some(vec![]);
        activity.electronic_links = Some(vec![]);

        let texts = texts(&render_document(&activity, &school()));
        assert!(!texts.iter().any(|t| t.contains("الأدوات اللازمة")));
        assert!(!texts.iter().any(|t| t.contains("خطوات تنفيذ النشاط")));
        assert!(!texts.iter().any(|t| t.contains("الموارد الرقمية")));
        assert!(texts.iter().any(|t| t.contains("اللعبة التنافسية الكبرى")));
    }

    #[test]
    fn rendering_twice_gives_equal_trees() {
        let activity = sample_activity();
        assert_eq!(
            render_document(&activity, &school()),
            render_document(&activity, &school())
        );
    }

    #[test]
    fn saves_sanitized_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut activity = sample_activity();
        activity.title = "وحدة 1/2: الكسور\n".to_string();

        let path = export_to_word(&activity, &school(), dir.path()).unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "activity_وحدة 1_2_ الكسور.docx");

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(
            bytes,
            render_document(&activity, &school()).to_bytes().unwrap()
        );
        // only the finished file is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn saves_activity_with_long_emoji_title() {
        let dir = tempfile::tempdir().unwrap();
        let mut activity = sample_activity();
        activity.title = "😀".repeat(100);

        let path = export_to_word(&activity, &school(), dir.path()).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.len() <= 200);
        assert!(name.starts_with("activity_😀"));
        assert!(path.is_file());
    }
}
