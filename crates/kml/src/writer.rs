//! KML serializer
//!
//! Writes a [`KmlDocument`] as pretty-printed XML with two-space indentation.
//! Output for the same document is byte-identical across runs.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::KML_NAMESPACE;
use crate::document::{Folder, KmlDocument, Placemark};
use crate::error::KmlError;
use crate::escape::xml_safe;
use crate::style::{LINE_WIDTH, Style};
use domain::Geometry;

type XmlWriter = Writer<Vec<u8>>;

/// Serialize a document to KML text
///
/// # Errors
///
/// Returns an error if the XML writer fails or produces invalid UTF-8.
pub fn serialize(document: &KmlDocument) -> Result<String, KmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;

    write_text(&mut writer, "name", &document.name)?;
    if let Some(description) = &document.description {
        write_text(&mut writer, "description", description)?;
    }
    for style in &document.styles {
        write_style(&mut writer, style)?;
    }
    for folder in &document.folders {
        write_folder(&mut writer, folder)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn write_text(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(&xml_safe(text))))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_style(writer: &mut XmlWriter, style: &Style) -> Result<(), KmlError> {
    let id = style.id();
    let color = style.color.kml_hex();

    writer.write_event(Event::Start(
        BytesStart::new("Style").with_attributes([("id", id.as_str())]),
    ))?;

    writer.write_event(Event::Start(BytesStart::new("IconStyle")))?;
    write_text(writer, "color", color)?;
    writer.write_event(Event::Start(BytesStart::new("Icon")))?;
    write_text(writer, "href", style.icon)?;
    writer.write_event(Event::End(BytesEnd::new("Icon")))?;
    writer.write_event(Event::End(BytesEnd::new("IconStyle")))?;

    writer.write_event(Event::Start(BytesStart::new("LineStyle")))?;
    write_text(writer, "color", color)?;
    write_text(writer, "width", &LINE_WIDTH.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("LineStyle")))?;

    writer.write_event(Event::End(BytesEnd::new("Style")))?;
    Ok(())
}

fn write_folder(writer: &mut XmlWriter, folder: &Folder) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new("Folder")))?;
    write_text(writer, "name", &folder.name)?;
    for child in &folder.folders {
        write_folder(writer, child)?;
    }
    for placemark in &folder.placemarks {
        write_placemark(writer, placemark)?;
    }
    writer.write_event(Event::End(BytesEnd::new("Folder")))?;
    Ok(())
}

fn write_placemark(writer: &mut XmlWriter, placemark: &Placemark) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    write_text(writer, "name", &placemark.name)?;
    write_text(writer, "description", &placemark.description)?;
    write_text(writer, "styleUrl", &placemark.style_url)?;
    write_geometry(writer, &placemark.geometry)?;
    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

fn write_geometry(writer: &mut XmlWriter, geometry: &Geometry) -> Result<(), KmlError> {
    let tag = match geometry {
        Geometry::Point(_) => "Point",
        Geometry::LineString(_) => "LineString",
    };

    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if !geometry.is_point() {
        write_text(writer, "tessellate", "1")?;
    }
    write_text(writer, "coordinates", &geometry.to_kml_coordinates())?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
