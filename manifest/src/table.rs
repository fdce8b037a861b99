//! Table rendering
//!
//! A [`TableWriter`] collects a header, rows and an optional footer and renders them once. Two
//! writers are available: [`CsvTableWriter`] emitting RFC 4180 CSV and [`PrettyTableWriter`] drawing a
//! bordered text table for terminals.

use crate::api::Result;
use log::debug;
use std::io::Write;
use strum_macros::{Display, EnumString};
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Table,
}

impl OutputFormat {
    pub fn writer<'a, W: 'a + Write>(self, out: W) -> Box<dyn TableWriter + 'a> {
        match self {
            OutputFormat::Csv => Box::new(CsvTableWriter::new(out)),
            OutputFormat::Table => Box::new(PrettyTableWriter::new(out)),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub header: Option<Vec<String>>,
    pub footer: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Header, rows and footer in output order.
    pub fn records(&self) -> impl Iterator<Item = &Vec<String>> {
        self.header.iter().chain(self.rows.iter()).chain(self.footer.iter())
    }
}

pub trait TableWriter {
    fn table(&mut self) -> &mut ReportTable;

    fn set_header(&mut self, cells: Vec<String>) {
        self.table().header = Some(cells);
    }

    fn set_footer(&mut self, cells: Vec<String>) {
        self.table().footer = Some(cells);
    }

    fn append(&mut self, row: Vec<String>) {
        self.table().rows.push(row);
    }

    /// Writes the table out and flushes the underlying writer.
    fn render(self: Box<Self>) -> Result<()>;
}

pub struct CsvTableWriter<W: Write> {
    writer: W,
    table: ReportTable,
}

impl<W: Write> CsvTableWriter<W> {
    pub fn new(writer: W) -> Self {
        CsvTableWriter {
            writer,
            table: ReportTable::default(),
        }
    }
}

impl<W: Write> TableWriter for CsvTableWriter<W> {
    fn table(&mut self) -> &mut ReportTable {
        &mut self.table
    }

    fn render(self: Box<Self>) -> Result<()> {
        let CsvTableWriter { writer, table } = *self;
        debug!("Rendering {} rows as CSV", table.rows.len());
        // Footer may be narrower than the rows.
        let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        for record in table.records() {
            csv.write_record(record)?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub struct PrettyTableWriter<W: Write> {
    writer: W,
    table: ReportTable,
}

impl<W: Write> PrettyTableWriter<W> {
    pub fn new(writer: W) -> Self {
        PrettyTableWriter {
            writer,
            table: ReportTable::default(),
        }
    }
}

impl<W: Write> TableWriter for PrettyTableWriter<W> {
    fn table(&mut self) -> &mut ReportTable {
        &mut self.table
    }

    fn render(self: Box<Self>) -> Result<()> {
        let PrettyTableWriter { mut writer, table } = *self;
        debug!("Rendering {} rows as table", table.rows.len());
        let mut builder = Builder::default();
        for record in table.records() {
            builder.push_record(record.iter().cloned());
        }
        let mut rendered = builder.build();
        rendered.with(Style::rounded());
        writeln!(writer, "{}", rendered)?;
        writer.flush()?;
        Ok(())
    }
}
