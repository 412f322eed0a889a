use std::fmt;

/// Categories of failure surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// subject or topic missing, no request was made
    Validation,
    /// generation credential missing, no request was made
    Configuration,
    ServiceUnavailable,
    MalformedResponse,
    /// the print view could not be opened
    ExportSurfaceUnavailable,
}

impl ErrorKind {
    /// Message shown in place of the activity.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "يرجى اختيار المبحث وإدخال عنوان الدرس",
            ErrorKind::Configuration => {
                "لم يتم ضبط مفتاح API. يرجى إضافة المفتاح إلى الإعدادات ثم المحاولة مجدداً."
            }
            ErrorKind::ServiceUnavailable => {
                "تعذر الاتصال بخدمة التوليد. يرجى التأكد من مفتاح API أو المحاولة لاحقاً."
            }
            ErrorKind::MalformedResponse => "حدث خطأ أثناء تصميم النشاط. يرجى المحاولة مرة أخرى.",
            ErrorKind::ExportSurfaceUnavailable => {
                "تعذر فتح نافذة الطباعة. يرجى السماح بالنوافذ المنبثقة."
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
            ErrorKind::ServiceUnavailable => "service unavailable",
            ErrorKind::MalformedResponse => "malformed response",
            ErrorKind::ExportSurfaceUnavailable => "export surface unavailable",
        };
        f.write_str(name)
    }
}
