use crate::model::{Board, ShiftType};
use crate::request::{CreateShiftRequest, ShiftDateInput, ShiftInput};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Import de gardes depuis CSV :
/// header `title,description,price,date,start_time,end_time,type`.
///
/// Les lignes consécutives de même titre forment une seule garde ; les champs
/// description/prix sont pris sur la première ligne du groupe.
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<CreateShiftRequest>> {
    let path = path.as_ref();
    let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_shifts_csv(file)
}

pub fn read_shifts_csv<R: Read>(reader: R) -> anyhow::Result<Vec<CreateShiftRequest>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut out: Vec<CreateShiftRequest> = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let title = rec.get(0).context("missing title")?.trim();
        if title.is_empty() {
            bail!("row {row}: empty title");
        }
        let description = rec.get(1).map(str::trim).filter(|d| !d.is_empty());
        let price: f64 = rec
            .get(2)
            .context("missing price")?
            .trim()
            .parse()
            .with_context(|| format!("row {row}: invalid price"))?;
        let date = rec.get(3).context("missing date")?.trim();
        let start = rec.get(4).context("missing start_time")?.trim();
        let end = rec.get(5).context("missing end_time")?.trim();
        let shift_type: ShiftType = rec
            .get(6)
            .context("missing type")?
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("row {row}: invalid type"))?;

        let entry = ShiftDateInput::new(date, start, end, shift_type);
        match out.last_mut() {
            Some(current) if current.shift.title == title => current.dates.push(entry),
            _ => out.push(CreateShiftRequest {
                shift: ShiftInput {
                    title: title.to_string(),
                    description: description.map(str::to_string),
                    price,
                },
                dates: vec![entry],
            }),
        }
    }
    Ok(out)
}

/// Export JSON du board (jolie mise en forme)
pub fn export_board_json<P: AsRef<Path>>(path: P, board: &Board) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(board)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des occurrences:
/// header `shift_id,title,date,start_time,end_time,type,price`
pub fn export_entries_csv<P: AsRef<Path>>(path: P, board: &Board) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_entries_csv(file, board)
}

pub fn write_entries_csv<W: Write>(writer: W, board: &Board) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(["shift_id", "title", "date", "start_time", "end_time", "type", "price"])?;
    for shift in &board.shifts {
        let price = shift.price.to_string();
        for d in &shift.dates {
            w.write_record([
                shift.id.as_str(),
                shift.title.as_str(),
                d.date.as_str(),
                d.start_time.as_str(),
                d.end_time.as_str(),
                d.shift_type.as_str(),
                price.as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}
