//! Drawing packed pages into a PDF document.
//!
//! Each [`Page`] becomes one A4 page. Every placed image is embedded once
//! as an image XObject and drawn into its card box with
//! `q <w 0 0 h x y> cm /ImN Do Q`. The image keeps its aspect ratio and is
//! centered in the box, so a card with slightly different proportions is
//! letterboxed rather than stretched.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, trace};

use crate::error::Result;
use crate::io::image::load_xobject;
use crate::layout::{Page, PageLayout, fit_within};

/// PDF version written in the header.
const PDF_VERSION: &str = "1.5";

/// A finished, not yet saved, document.
#[derive(Debug)]
pub struct RenderedSheet {
    /// The document.
    pub document: Document,
    /// Number of pages emitted.
    pub page_count: usize,
    /// Number of images drawn.
    pub image_count: usize,
}

/// An embedded image and the resource name it is drawn with.
#[derive(Debug, Clone)]
struct Embedded {
    id: ObjectId,
    name: String,
    width: u32,
    height: u32,
}

/// Builds a PDF document from packed pages.
#[derive(Debug)]
pub struct SheetRenderer<'a> {
    layout: &'a PageLayout,
    title: Option<String>,
}

impl<'a> SheetRenderer<'a> {
    /// Create a renderer for the given page geometry.
    pub fn new(layout: &'a PageLayout) -> Self {
        Self {
            layout,
            title: None,
        }
    }

    /// Set the document title stored in the info dictionary.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Render pages in order.
    ///
    /// Images are read from disk here. A file that disappeared or changed
    /// since validation aborts rendering; nothing is written in that case.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CardSheetError::RenderFailed`] if an image cannot be
    /// loaded.
    pub fn render<I>(&self, pages: I) -> Result<RenderedSheet>
    where
        I: IntoIterator<Item = Page>,
    {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        let mut embedded: HashMap<PathBuf, Embedded> = HashMap::new();
        let mut kids = Vec::new();
        let mut image_count = 0;

        for page in pages {
            let mut operations = Vec::with_capacity(page.len() * 4);
            let mut xobjects = Dictionary::new();

            for placed in &page.images {
                let image = match embedded.get(&placed.path) {
                    Some(image) => image.clone(),
                    None => {
                        let image = embed_image(&mut doc, &placed.path, embedded.len() + 1)?;
                        embedded.insert(placed.path.clone(), image.clone());
                        image
                    }
                };

                let target = fit_within(placed.rect, image.width, image.height);
                trace!(
                    "Page {} row {} column {}: {} at ({:.2}, {:.2}) {:.2}x{:.2}",
                    page.number,
                    placed.row,
                    placed.column,
                    placed.path.display(),
                    target.x,
                    target.y,
                    target.width,
                    target.height
                );

                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        target.width.into(),
                        0.into(),
                        0.into(),
                        target.height.into(),
                        target.x.into(),
                        target.y.into(),
                    ],
                ));
                operations.push(Operation::new(
                    "Do",
                    vec![Object::Name(image.name.clone().into_bytes())],
                ));
                operations.push(Operation::new("Q", vec![]));
                xobjects.set(image.name.as_bytes(), image.id);
                image_count += 1;
            }

            let content = Content { operations }.encode()?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
            let media_box: Vec<Object> = vec![
                0.into(),
                0.into(),
                self.layout.page_width.into(),
                self.layout.page_height.into(),
            ];

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => xobjects,
                },
            });
            debug!("Rendered page {} with {} images", page.number, page.len());
            kids.push(page_id);
        }

        let page_count = kids.len();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
                "Count" => page_count as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(self.info_dictionary());
        doc.trailer.set("Info", info_id);

        Ok(RenderedSheet {
            document: doc,
            page_count,
            image_count,
        })
    }

    fn info_dictionary(&self) -> Dictionary {
        let mut info = dictionary! {
            "Producer" => text_string(&format!("{} {}", crate::NAME, crate::VERSION)),
        };
        if let Some(ref title) = self.title {
            info.set("Title", text_string(title));
        }
        info
    }
}

fn embed_image(doc: &mut Document, path: &std::path::Path, ordinal: usize) -> Result<Embedded> {
    let xobject = load_xobject(path)?;
    let (width, height) = (xobject.width, xobject.height);
    let mut stream = xobject.stream;

    if let Some(mask) = xobject.smask {
        let mask_id = doc.add_object(mask);
        stream.dict.set("SMask", mask_id);
    }

    let id = doc.add_object(stream);
    Ok(Embedded {
        id,
        name: format!("Im{ordinal}"),
        width,
        height,
    })
}

/// Encode a PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::string_literal(text)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}
