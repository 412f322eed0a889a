use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use quick_xml::escape::escape;

use super::filename::export_file_name;
use crate::activity::ActivityContent;
use crate::school::SchoolInfo;

const STYLESHEET: &str = r#"
      body { font-family: 'Cairo', sans-serif; padding: 40px; color: #333; line-height: 1.6; }
      .header { text-align: center; border-bottom: 2px solid #059669; padding-bottom: 20px; margin-bottom: 30px; }
      .title { color: #065f46; font-size: 24px; font-weight: bold; }
      .section { margin-bottom: 25px; }
      .section-title { font-weight: bold; color: #047857; border-right: 4px solid #059669; padding-right: 10px; margin-bottom: 10px; }
      .activity-card { border: 1px solid #e5e7eb; padding: 15px; border-radius: 8px; margin-bottom: 15px; }
      .game-box { background: #fef3c7; border: 2px dashed #d97706; padding: 20px; border-radius: 12px; margin-top: 20px; }
      .game-box .section-title { border-right-color: #d97706; color: #92400e; }
      .digital-box { background: #f0f9ff; border: 1px solid #bae6fd; padding: 15px; border-radius: 12px; margin-bottom: 10px; }
      .link-to-obj { font-size: 13px; color: #059669; font-style: italic; margin-top: 5px; }
      .footer { margin-top: 50px; text-align: center; font-size: 12px; color: #666; border-top: 1px solid #eee; padding-top: 20px; }
      @media print { .no-print { display: none; } }
"#;

fn esc(text: &str) -> Cow<'_, str> {
    escape(text)
}

fn push_list(html: &mut String, tag: &str, items: &[String]) {
    html.push_str(&format!("<{}>", tag));
    for item in items {
        html.push_str(&format!("<li>{}</li>", esc(item)));
    }
    html.push_str(&format!("</{}>\n", tag));
}

fn open_section(html: &mut String, class: &str, heading: &str) {
    html.push_str(&format!(r#"    <div class="{}">"#, class));
    html.push('\n');
    html.push_str(&format!(r#"      <div class="section-title">{}</div>"#, heading));
    html.push('\n');
}

/// Renders the print-ready HTML page. Same input, same bytes.
pub fn render_printable(activity: &ActivityContent, school: &SchoolInfo) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html dir=\"rtl\" lang=\"ar\">\n");
    html.push_str("  <head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str(&format!("    <title>{}</title>\n", esc(&activity.title)));
    html.push_str(r#"    <link href="https://fonts.googleapis.com/css2?family=Cairo:wght@400;700&amp;display=swap" rel="stylesheet">"#);
    html.push('\n');
    html.push_str(&format!("    <style title=\"print\">{}    </style>\n", STYLESHEET));
    html.push_str("  </head>\n");
    html.push_str("  <body>\n");

    // header
    html.push_str("    <div class=\"header\">\n");
    html.push_str(&format!(
        "      <div class=\"title\">نشاط صفي تفاعلي: {}</div>\n",
        esc(&activity.title)
    ));
    html.push_str(&format!(
        "      <div>المبحث: {} | الفصل الدراسي: {}</div>\n",
        esc(&activity.subject),
        esc(&activity.semester)
    ));
    html.push_str(&format!(
        "      <div style=\"margin-top: 10px; font-weight: bold;\">إعداد المعلمة: {}</div>\n",
        esc(&school.teacher)
    ));
    html.push_str(&format!(
        "      <div style=\"font-size: 14px;\">{}</div>\n",
        esc(&school.school)
    ));
    html.push_str("    </div>\n");

    open_section(&mut html, "section", "🎯 الهدف التعليمي:");
    html.push_str(&format!("      <p>{}</p>\n", esc(&activity.objective)));
    html.push_str("    </div>\n");

    if !activity.tools().is_empty() {
        open_section(&mut html, "section", "🛠️ الأدوات والوسائل:");
        push_list(&mut html, "ul", activity.tools());
        html.push_str("    </div>\n");
    }

    if !activity.procedure().is_empty() {
        open_section(&mut html, "section", "🪜 خطوات تنفيذ النشاط:");
        push_list(&mut html, "ol", activity.procedure());
        html.push_str("    </div>\n");
    }

    open_section(&mut html, "section", "🌟 الأنشطة التفاعلية المقترحة:");
    for card in &activity.interactive_activities {
        html.push_str("      <div class=\"activity-card\">\n");
        html.push_str(&format!(
            "        <strong>[{}] {}</strong>\n",
            card.activity_type.label(),
            esc(&card.title)
        ));
        html.push_str(&format!("        <p>{}</p>\n", esc(&card.description)));
        push_list(&mut html, "ol", &card.instructions);
        html.push_str("      </div>\n");
    }
    html.push_str("    </div>\n");

    let game = &activity.competitive_game;
    open_section(
        &mut html,
        "game-box",
        &format!("🏆 اللعبة التنافسية الكبرى: {}", esc(&game.name)),
    );
    html.push_str(&format!(
        "      <p><strong>طريقة التنفيذ:</strong> {}</p>\n",
        esc(&game.suggested_format)
    ));
    push_list(&mut html, "ol", &game.rules);
    html.push_str("    </div>\n");

    if !activity.links().is_empty() {
        html.push_str("    <div class=\"section\" style=\"margin-top: 20px;\">\n");
        html.push_str("      <div class=\"section-title\">🔗 الموارد الرقمية والأنشطة التفاعلية:</div>\n");
        for link in activity.links() {
            html.push_str("      <div class=\"digital-box\">\n");
            html.push_str(&format!(
                "        <strong>{} ({})</strong>\n",
                esc(&link.platform),
                link.tool_type.as_str()
            ));
            html.push_str(&format!(
                "        <p style=\"margin: 5px 0;\">{}</p>\n",
                esc(&link.description)
            ));
            html.push_str(&format!(
                "        <div class=\"link-to-obj\">الارتباط بالهدف: {}</div>\n",
                esc(&link.link_to_objective)
            ));
            html.push_str("      </div>\n");
        }
        html.push_str("    </div>\n");
    }

    open_section(&mut html, "section", "💡 الخلاصة وبصمة المعلمة:");
    html.push_str(&format!("      <p><em>{}</em></p>\n", esc(&activity.conclusion)));
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"footer\">\n");
    html.push_str(&format!("      <p>{}</p>\n", esc(&attribution(school))));
    html.push_str("    </div>\n");

    html.push_str("    <script>window.onload = () => { window.print(); };</script>\n");
    html.push_str("  </body>\n");
    html.push_str("</html>\n");

    html
}

/// Footer line shared by both renderers.
pub fn attribution(school: &SchoolInfo) -> String {
    format!(
        "تم الإنشاء بواسطة منصة المعلمة {} التعليمية - {}",
        school.teacher, school.location
    )
}

/// A place a finished print view can be shown.
pub trait PrintSurface {
    /// Shows the document in a new viewing context. Returns `false` when the
    /// host gave us none; nothing else is reported.
    fn present(&mut self, name: &str, html: &str) -> bool;
}

/// Writes the page next to the other exports and hands it to the browser.
pub struct BrowserSurface {
    dir: PathBuf,
    launch: bool,
    last_opened: Option<PathBuf>,
}

impl BrowserSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            launch: true,
            last_opened: None,
        }
    }

    /// Keeps the file but does not start a browser.
    pub fn without_launch(mut self) -> Self {
        self.launch = false;
        self
    }

    pub fn last_opened(&self) -> Option<&Path> {
        self.last_opened.as_deref()
    }
}

impl PrintSurface for BrowserSurface {
    fn present(&mut self, name: &str, html: &str) -> bool {
        let path = self.dir.join(name);
        if let Err(e) = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, html)) {
            warn!("could not write print view {}: {}", path.display(), e);
            return false;
        }

        if self.launch {
            if let Err(e) = open::that(&path) {
                warn!("could not open print view {}: {}", path.display(), e);
                return false;
            }
        }

        info!("print view ready at {}", path.display());
        self.last_opened = Some(path);
        true
    }
}

/// Renders the activity and asks the surface to print it.
/// Returns whether a surface was obtained.
pub fn export_to_pdf(
    activity: &ActivityContent,
    school: &SchoolInfo,
    surface: &mut impl PrintSurface,
) -> bool {
    let html = render_printable(activity, school);
    surface.present(&export_file_name(&activity.title, "html"), &html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::tests::sample_activity;
    use crate::school::Profile;
    use proptest::prelude::*;

    fn school() -> SchoolInfo {
        Profile::default().school
    }

    struct BlockedSurface;

    impl PrintSurface for BlockedSurface {
        fn present(&mut self, _name: &str, _html: &str) -> bool {
            false
        }
    }

    #[test]
    fn renders_every_section_in_order() {
        let html = render_printable(&sample_activity(), &school());

        let order = [
            "نشاط صفي تفاعلي: الكسور العشرية",
            "إعداد المعلمة: رانية شريم",
            "الهدف التعليمي",
            "<li>بطاقات ملونة</li><li>سبورة</li>",
            "<li>تقسيم المجموعات</li><li>توزيع البطاقات</li>",
            "[جماعي] سباق الكسور",
            "اللعبة التنافسية الكبرى: تحدي الأرقام",
            "Wordwall (لعبة تعليمية)",
            "الارتباط بالهدف: تعزز المقارنة",
            "<em>الكسور في حياتنا اليومية</em>",
            "تم الإنشاء بواسطة منصة المعلمة رانية شريم التعليمية - فلسطين - طولكرم",
            "window.print()",
        ];
        let mut cursor = 0;
        for needle in order {
            let found = html[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' missing or out of order", needle));
            cursor += found + needle.len();
        }
    }

    #[test]
    fn omits_empty_optional_sections() {
        let mut activity = sample_activity();
        activity.tools_needed = Some(vec![]);
        activity.steps = None;
        activity.electronic_links = None;

        let html = render_printable(&activity, &school());
        assert!(!html.contains("الأدوات والوسائل"));
        assert!(!html.contains("خطوات تنفيذ النشاط"));
        assert!(!html.contains("الموارد الرقمية"));
        assert!(html.contains("الهدف التعليمي"));
        assert!(html.contains("game-box"));
        assert!(html.contains("الخلاصة"));
    }

    #[test]
    fn escapes_markup_in_every_field() {
        let mut activity = sample_activity();
        activity.title = "<script>alert('x')</script>".to_string();
        activity.objective = "a & b \"quoted\"".to_string();
        activity.competitive_game.rules = vec!["</ol><img src=x onerror=alert(1)>".to_string()];

        let html = render_printable(&activity, &school());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&apos;x&apos;)&lt;/script&gt;"));
        assert!(html.contains("a &amp; b &quot;quoted&quot;"));
        assert!(!html.contains("<img"));
        // the only script element is the print trigger
        assert_eq!(html.matches("<script>").count(), 1);
    }

    #[test]
    fn blocked_surface_is_a_no_op() {
        assert!(!export_to_pdf(&sample_activity(), &school(), &mut BlockedSurface));
    }

    #[test]
    fn browser_surface_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = BrowserSurface::new(dir.path()).without_launch();

        assert!(export_to_pdf(&sample_activity(), &school(), &mut surface));
        let path = surface.last_opened().unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "activity_الكسور العشرية.html"
        );
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, render_printable(&sample_activity(), &school()));
    }

    #[test]
    fn page_is_framed_line_by_line() {
        let html = render_printable(&sample_activity(), &school());
        assert!(html.starts_with("<!DOCTYPE html>\n<html dir=\"rtl\" lang=\"ar\">\n  <head>\n"));
        assert!(html.ends_with("  </body>\n</html>\n"));
        assert!(html.contains(
            "\n    <script>window.onload = () => { window.print(); };</script>\n"
        ));
        assert!(html.contains(
            "    <div class=\"game-box\">\n      <div class=\"section-title\">🏆 اللعبة التنافسية الكبرى: تحدي الأرقام</div>\n"
        ));
        assert!(html.contains("<ol><li>تقسيم المجموعات</li><li>توزيع البطاقات</li></ol>\n"));
    }

    #[test]
    fn browser_surface_accepts_long_emoji_titles() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = BrowserSurface::new(dir.path()).without_launch();
        let mut activity = sample_activity();
        activity.title = "😀".repeat(100);

        assert!(export_to_pdf(&activity, &school(), &mut surface));
        let name = surface.last_opened().unwrap().file_name().unwrap().to_str().unwrap();
        assert!(name.len() <= 200);
        assert!(name.ends_with(".html"));
    }

    proptest! {
        #[test]
        fn rendering_is_deterministic(title in ".{0,40}", conclusion in ".{0,80}") {
            let mut activity = sample_activity();
            activity.title = title;
            activity.conclusion = conclusion;
            prop_assert_eq!(
                render_printable(&activity, &school()),
                render_printable(&activity, &school())
            );
        }

        #[test]
        fn injected_markup_never_survives(payload in "[a-z<>&\"' /=]{0,40}") {
            let mut activity = sample_activity();
            activity.title = payload.clone();
            activity.interactive_activities[0].description = payload.clone();
            activity.competitive_game.rules[0] = payload.clone();
            if let Some(links) = activity.electronic_links.as_mut() {
                links[0].platform = payload.clone();
            }
            let html = render_printable(&activity, &school());
            let baseline = render_printable(&sample_activity(), &school());
            // escaped text adds no tags
            prop_assert_eq!(html.matches('<').count(), baseline.matches('<').count());
        }
    }
}
