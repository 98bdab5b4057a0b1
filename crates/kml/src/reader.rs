//! Structural KML reader
//!
//! Parses KML text back into a light outline: folders, placemarks and the
//! text of the elements the writer emits. Used to check that serialized output
//! is well-formed and carries the same content that went in.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::KML_NAMESPACE;
use crate::error::KmlError;

/// Placemark as read back from KML text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacemarkOutline {
    /// Text of `<name>`
    pub name: String,
    /// Unescaped text of `<description>`
    pub description: String,
    /// Text of `<styleUrl>`
    pub style_url: String,
    /// `Point` or `LineString`
    pub geometry: String,
    /// Text of `<coordinates>`
    pub coordinates: String,
}

/// Folder as read back from KML text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderOutline {
    /// Text of the folder's `<name>`
    pub name: String,
    /// Nested folders
    pub folders: Vec<FolderOutline>,
    /// Placemarks directly in this folder
    pub placemarks: Vec<PlacemarkOutline>,
}

impl FolderOutline {
    /// Count placemarks in this folder and all nested folders
    #[must_use]
    pub fn placemark_count(&self) -> usize {
        self.placemarks.len() + self.folders.iter().map(Self::placemark_count).sum::<usize>()
    }

    /// Find a direct sub-folder by name
    #[must_use]
    pub fn folder(&self, name: &str) -> Option<&Self> {
        self.folders.iter().find(|f| f.name == name)
    }
}

/// Document as read back from KML text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KmlOutline {
    /// Document name
    pub name: String,
    /// Document description, if any
    pub description: Option<String>,
    /// Ids of shared styles
    pub style_ids: Vec<String>,
    /// Top-level folders
    pub folders: Vec<FolderOutline>,
    /// Placemarks placed directly in the document
    pub placemarks: Vec<PlacemarkOutline>,
}

impl KmlOutline {
    /// Total number of placemarks
    #[must_use]
    pub fn placemark_count(&self) -> usize {
        self.placemarks.len()
            + self
                .folders
                .iter()
                .map(FolderOutline::placemark_count)
                .sum::<usize>()
    }

    /// Find a top-level folder by name
    #[must_use]
    pub fn folder(&self, name: &str) -> Option<&FolderOutline> {
        self.folders.iter().find(|f| f.name == name)
    }
}

#[derive(Default)]
struct OutlineState {
    outline: KmlOutline,
    path: Vec<String>,
    folders: Vec<FolderOutline>,
    placemark: Option<PlacemarkOutline>,
    text: String,
    seen_root: bool,
}

impl OutlineState {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), KmlError> {
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();

        if !self.seen_root {
            if name != "kml" {
                return Err(KmlError::NotKml(format!("root element is '{name}'")));
            }
            let namespace = attribute(element, "xmlns")?;
            if namespace.as_deref() != Some(KML_NAMESPACE) {
                return Err(KmlError::NotKml(format!(
                    "namespace is {}",
                    namespace.as_deref().unwrap_or("missing")
                )));
            }
            self.seen_root = true;
        }

        match name.as_str() {
            "Folder" => self.folders.push(FolderOutline::default()),
            "Placemark" => self.placemark = Some(PlacemarkOutline::default()),
            "Point" | "LineString" => {
                if let Some(placemark) = self.placemark.as_mut() {
                    placemark.geometry.clone_from(&name);
                }
            }
            "Style" => {
                if let Some(id) = attribute(element, "id")? {
                    self.outline.style_ids.push(id);
                }
            }
            _ => {}
        }

        self.path.push(name);
        self.text.clear();
        Ok(())
    }

    fn close(&mut self) -> Result<(), KmlError> {
        let name = self
            .path
            .pop()
            .ok_or_else(|| KmlError::Structure("unbalanced end tag".to_string()))?;
        let parent = self.path.last().map(String::as_str);
        let text = std::mem::take(&mut self.text);

        match (name.as_str(), parent) {
            ("name", Some("Placemark")) => {
                if let Some(p) = self.placemark.as_mut() {
                    p.name = text;
                }
            }
            ("description", Some("Placemark")) => {
                if let Some(p) = self.placemark.as_mut() {
                    p.description = text;
                }
            }
            ("styleUrl", Some("Placemark")) => {
                if let Some(p) = self.placemark.as_mut() {
                    p.style_url = text;
                }
            }
            ("coordinates", Some("Point" | "LineString")) => {
                if let Some(p) = self.placemark.as_mut() {
                    p.coordinates = text;
                }
            }
            ("name", Some("Folder")) => {
                if let Some(f) = self.folders.last_mut() {
                    f.name = text;
                }
            }
            ("name", Some("Document")) => self.outline.name = text,
            ("description", Some("Document")) => self.outline.description = Some(text),
            ("Placemark", _) => {
                let placemark = self
                    .placemark
                    .take()
                    .ok_or_else(|| KmlError::Structure("nested Placemark".to_string()))?;
                match self.folders.last_mut() {
                    Some(folder) => folder.placemarks.push(placemark),
                    None => self.outline.placemarks.push(placemark),
                }
            }
            ("Folder", _) => {
                let folder = self
                    .folders
                    .pop()
                    .ok_or_else(|| KmlError::Structure("unbalanced Folder".to_string()))?;
                match self.folders.last_mut() {
                    Some(parent) => parent.folders.push(folder),
                    None => self.outline.folders.push(folder),
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>, KmlError> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parse KML text into a structural outline
///
/// # Errors
///
/// Returns an error if the text is not well-formed XML, the root element is
/// not `kml` in the KML 2.2 namespace, or the nesting is inconsistent.
pub fn outline(xml: &str) -> Result<KmlOutline, KmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut state = OutlineState::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => state.open(&e)?,
            Event::Empty(e) => {
                state.open(&e)?;
                state.close()?;
            }
            Event::End(_) => state.close()?,
            Event::Text(t) => state.text.push_str(&t.unescape()?),
            Event::CData(c) => state.text.push_str(&String::from_utf8(c.into_inner().into_owned())?),
            Event::Eof => break,
            _ => {}
        }
    }

    if !state.seen_root {
        return Err(KmlError::NotKml("no root element".to_string()));
    }
    if !state.path.is_empty() {
        return Err(KmlError::Structure(format!(
            "unclosed element '{}'",
            state.path.join("/")
        )));
    }
    Ok(state.outline)
}
