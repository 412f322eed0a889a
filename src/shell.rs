use log::{info, warn};

use crate::activity::ActivityContent;
use crate::error::ErrorKind;
use crate::generator::{Generate, GenerationError};
use crate::school::{Profile, Semester};

/// Identifies one generation request; later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Inputs captured when a request starts.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub ticket: Ticket,
    pub subject: String,
    pub semester: Semester,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedError {
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl From<ErrorKind> for DisplayedError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.user_message(),
        }
    }
}

/// UI state of the form: selections, the in-flight flag, and what is shown.
#[derive(Debug)]
pub struct Shell {
    profile: Profile,
    subject_id: Option<String>,
    semester: Semester,
    topic: String,
    loading: bool,
    activity: Option<ActivityContent>,
    error: Option<DisplayedError>,
    latest: u64,
}

impl Shell {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            subject_id: None,
            semester: Semester::default(),
            topic: String::new(),
            loading: false,
            activity: None,
            error: None,
            latest: 0,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn select_subject(&mut self, id: &str) {
        self.subject_id = Some(id.to_string());
    }

    pub fn select_semester(&mut self, semester: Semester) {
        self.semester = semester;
    }

    pub fn set_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn activity(&self) -> Option<&ActivityContent> {
        self.activity.as_ref()
    }

    pub fn error(&self) -> Option<&DisplayedError> {
        self.error.as_ref()
    }

    /// Validates the form and starts a request, replacing whatever was shown.
    ///
    /// A missing subject or topic is reported without starting anything.
    pub fn begin_generation(&mut self) -> Result<GenerationRequest, ErrorKind> {
        let subject = self
            .subject_id
            .as_deref()
            .and_then(|id| self.profile.subject(id))
            .map(|s| s.name.clone());
        let topic = self.topic.trim();

        let subject = match subject {
            Some(subject) if !topic.is_empty() => subject,
            _ => {
                self.error = Some(ErrorKind::Validation.into());
                return Err(ErrorKind::Validation);
            }
        };

        self.latest += 1;
        self.error = None;
        self.activity = None;
        self.loading = true;

        Ok(GenerationRequest {
            ticket: Ticket(self.latest),
            subject,
            semester: self.semester,
            topic: topic.to_string(),
        })
    }

    /// Applies a finished request. Results of superseded requests are
    /// dropped; returns whether this one was applied.
    pub fn complete_generation(
        &mut self,
        ticket: Ticket,
        result: Result<ActivityContent, GenerationError>,
    ) -> bool {
        if ticket.0 != self.latest {
            warn!(
                "discarding result of request {} superseded by {}",
                ticket.0, self.latest
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(activity) => {
                info!("showing activity '{}'", activity.title);
                self.error = None;
                self.activity = Some(activity);
            }
            Err(e) => {
                warn!("generation failed: {}", e);
                self.activity = None;
                self.error = Some(e.kind().into());
            }
        }
        true
    }

    /// Runs a whole request against `generator`, blocking until it finishes.
    pub fn generate_with(&mut self, generator: &impl Generate) -> Option<&ActivityContent> {
        let request = self.begin_generation().ok()?;
        let result = generator.generate(
            &request.subject,
            request.semester.as_str(),
            &request.topic,
        );
        self.complete_generation(request.ticket, result);
        self.activity.as_ref()
    }

    /// Records that the print view could not be opened.
    pub fn report_export_surface_unavailable(&mut self) {
        self.error = Some(ErrorKind::ExportSurfaceUnavailable.into());
    }
}
