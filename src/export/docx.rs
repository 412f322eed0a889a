//! A small word-processing document tree and its OOXML (`.docx`) packager.
//!
//! Only what the activity export needs: headings, aligned paragraphs with
//! spacing, and bold/italic runs. Every paragraph is right-to-left.

use std::borrow::Cow;
use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to package document: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Heading1,
    Heading2,
}

impl HeadingLevel {
    fn style_id(&self) -> &'static str {
        match self {
            HeadingLevel::Heading1 => "Heading1",
            HeadingLevel::Heading2 => "Heading2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub heading: Option<HeadingLevel>,
    pub alignment: Alignment,
    /// twentieths of a point
    pub spacing_before: Option<u32>,
    pub spacing_after: Option<u32>,
}

impl Paragraph {
    pub fn new(run: Run) -> Self {
        Self {
            runs: vec![run],
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Run::plain(text))
    }

    pub fn heading(mut self, level: HeadingLevel) -> Self {
        self.heading = Some(level);
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn before(mut self, twips: u32) -> Self {
        self.spacing_before = Some(twips);
        self
    }

    pub fn after(mut self, twips: u32) -> Self {
        self.spacing_after = Some(twips);
        self
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn write_xml(&self, xml: &mut String) {
        xml.push_str("<w:p><w:pPr>");
        if let Some(level) = self.heading {
            xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, level.style_id()));
        }
        xml.push_str("<w:bidi/>");
        if self.spacing_before.is_some() || self.spacing_after.is_some() {
            xml.push_str("<w:spacing");
            if let Some(before) = self.spacing_before {
                xml.push_str(&format!(r#" w:before="{}""#, before));
            }
            if let Some(after) = self.spacing_after {
                xml.push_str(&format!(r#" w:after="{}""#, after));
            }
            xml.push_str("/>");
        }
        let jc = match self.alignment {
            Alignment::Right => "right",
            Alignment::Center => "center",
        };
        xml.push_str(&format!(r#"<w:jc w:val="{}"/></w:pPr>"#, jc));

        for run in &self.runs {
            xml.push_str("<w:r><w:rPr>");
            if run.bold {
                xml.push_str("<w:b/><w:bCs/>");
            }
            if run.italic {
                xml.push_str("<w:i/><w:iCs/>");
            }
            xml.push_str("<w:rtl/></w:rPr>");
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
                xml_text(&run.text)
            ));
        }
        xml.push_str("</w:p>");
    }
}

/// Characters allowed in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escapes `text` for element content, dropping characters XML cannot carry.
fn xml_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return escape(text);
    }
    let kept: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    Cow::Owned(escape(kept.as_str()).into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:sz w:val="24"/><w:szCs w:val="24"/><w:lang w:val="en-US" w:bidi="ar-SA"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:bCs/><w:color w:val="065F46"/><w:sz w:val="36"/><w:szCs w:val="36"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="100"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:bCs/><w:color w:val="047857"/><w:sz w:val="30"/><w:szCs w:val="30"/></w:rPr></w:style></w:styles>"#;

impl Document {
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// The `word/document.xml` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 * self.paragraphs.len() + 512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
        );
        for paragraph in &self.paragraphs {
            paragraph.write_xml(&mut xml);
        }
        // A4 portrait, 1 inch margins, right-to-left section
        xml.push_str(r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/><w:bidi/></w:sectPr>"#);
        xml.push_str("</w:body></w:document>");
        xml
    }

    /// Packs the whole document in memory; either all bytes or an error.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let document = self.to_xml();
        let parts: [(&str, &str); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS),
            ("word/styles.xml", STYLES),
            ("word/document.xml", &document),
        ];
        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }
}
