use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::trace;
use quick_xml::{
    escape::resolve_predefined_entity,
    events::{BytesStart, Event},
    Reader,
};

use super::errors::MccMncError;

/// Main body part of a WordprocessingML package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Cell texts of one table row, merged cells repeated once per grid column.
///
/// A vertically merged continuation cell carries the text of the cell that
/// starts the merge.
pub type TableRow = Vec<String>;

/// Reads top-level table `index` (counting from 0) out of a `.docx` file.
pub fn read_docx_table(path: &Path, index: usize) -> Result<Vec<TableRow>, MccMncError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let document = archive.by_name(DOCUMENT_PART)?;
    read_table(BufReader::new(document), index)
}

/// Reads top-level table `index` out of a WordprocessingML document body.
///
/// Tables nested inside cells are not counted and their text is ignored.
/// A cell's paragraphs are joined with `\n`.
pub fn read_table<R: BufRead>(xml: R, index: usize) -> Result<Vec<TableRow>, MccMncError> {
    let mut reader = Reader::from_reader(xml);
    // whitespace inside w:t runs is part of the text
    reader.config_mut().trim_text(false);

    let mut collector = TableCollector::new(index);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => collector.open(&e),
            Event::Empty(e) => {
                collector.open(&e);
                collector.close(e.local_name().as_ref());
            }
            Event::End(e) => collector.close(e.local_name().as_ref()),
            Event::Text(e) if collector.in_text => {
                let text = e.decode().map_err(quick_xml::Error::from)?;
                collector.push_str(&text);
            }
            Event::GeneralRef(e) if collector.in_text => {
                if let Some(ch) = e.resolve_char_ref()? {
                    collector.push_char(ch);
                } else {
                    let name = e.decode().map_err(quick_xml::Error::from)?;
                    if let Some(entity) = resolve_predefined_entity(&name) {
                        collector.push_str(entity);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();

        if collector.finished {
            break;
        }
    }

    if !collector.finished {
        return Err(MccMncError::TableNotFound {
            index,
            found: collector.tables_seen,
        });
    }
    trace!("table {} has {} rows", index, collector.rows.len());
    Ok(collector.rows)
}

#[derive(Default)]
struct CellText {
    text: String,
    paragraphs: usize,
    span: usize,
    continues_merge: bool,
}

struct TableCollector {
    target: usize,
    tables_seen: usize,
    depth: usize,
    capturing: bool,
    finished: bool,
    in_text: bool,
    in_paragraph_properties: bool,
    rows: Vec<TableRow>,
    row: Option<TableRow>,
    cell: Option<CellText>,
}

impl TableCollector {
    fn new(target: usize) -> Self {
        Self {
            target,
            tables_seen: 0,
            depth: 0,
            capturing: false,
            finished: false,
            in_text: false,
            in_paragraph_properties: false,
            rows: Vec::new(),
            row: None,
            cell: None,
        }
    }

    /// Cell of the wanted table that is currently open, outside nested tables.
    fn cell_mut(&mut self) -> Option<&mut CellText> {
        if self.capturing && self.depth == 1 {
            self.cell.as_mut()
        } else {
            None
        }
    }

    fn open(&mut self, element: &BytesStart<'_>) {
        match element.local_name().as_ref() {
            b"tbl" => {
                self.depth += 1;
                if self.depth == 1 {
                    self.capturing = self.tables_seen == self.target;
                    self.tables_seen += 1;
                }
            }
            b"tr" if self.capturing && self.depth == 1 => self.row = Some(TableRow::new()),
            b"tc" if self.capturing && self.depth == 1 => {
                self.cell = Some(CellText {
                    span: 1,
                    ..Default::default()
                })
            }
            b"gridSpan" => {
                let span = grid_span(element);
                if let Some(cell) = self.cell_mut() {
                    cell.span = span;
                }
            }
            b"vMerge" => {
                // a bare <w:vMerge/> means "continue"
                let continues = val_attribute(element).is_none_or(|val| val != "restart");
                if let Some(cell) = self.cell_mut() {
                    cell.continues_merge = continues;
                }
            }
            b"p" => {
                if let Some(cell) = self.cell_mut() {
                    if cell.paragraphs > 0 {
                        cell.text.push('\n');
                    }
                    cell.paragraphs += 1;
                }
            }
            b"pPr" => self.in_paragraph_properties = true,
            b"t" => self.in_text = self.cell_mut().is_some(),
            // w:tab inside w:pPr is a tab stop definition, not a tab character
            b"tab" if !self.in_paragraph_properties => self.push_char('\t'),
            b"br" | b"cr" => self.push_char('\n'),
            _ => {}
        }
    }

    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"tbl" => {
                if self.depth == 1 && self.capturing {
                    self.capturing = false;
                    self.finished = true;
                }
                self.depth = self.depth.saturating_sub(1);
            }
            b"tr" if self.capturing && self.depth == 1 => {
                if let Some(row) = self.row.take() {
                    self.rows.push(row);
                }
            }
            b"tc" if self.capturing && self.depth == 1 => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    let column = row.len();
                    for offset in 0..cell.span {
                        let text = if cell.continues_merge {
                            // rows are kept by grid column; the cell above shares the index
                            self.rows
                                .last()
                                .and_then(|above| above.get(column + offset))
                                .cloned()
                                .unwrap_or_default()
                        } else {
                            cell.text.clone()
                        };
                        row.push(text);
                    }
                }
            }
            b"pPr" => self.in_paragraph_properties = false,
            b"t" => self.in_text = false,
            _ => {}
        }
    }

    fn push_str(&mut self, text: &str) {
        if let Some(cell) = self.cell_mut() {
            cell.text.push_str(text);
        }
    }

    fn push_char(&mut self, ch: char) {
        if let Some(cell) = self.cell_mut() {
            cell.text.push(ch);
        }
    }
}

fn val_attribute(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"val")
        .and_then(|attr| String::from_utf8(attr.value.into_owned()).ok())
}

fn grid_span(element: &BytesStart<'_>) -> usize {
    val_attribute(element)
        .and_then(|val| val.parse().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}
