use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use indexmap::IndexMap;

use idcard_core::{EmployeeId, EmployeeType, JoiningYear};
use idcard_directory::{DeleteOutcome, DomainRegistry, EmployeeRecord, RecordFields};
use idcard_infra::{CardRepository, IdCardDesk};

use crate::cli::{Command, CreateArgs, EditArgs, PreviewArgs};
use crate::photo;

/// Placeholder shown while a preview is incomplete.
const NO_ID: &str = "—";

pub fn run<R, W>(desk: &mut IdCardDesk<R>, command: Command, out: &mut W) -> Result<()>
where
    R: CardRepository,
    W: Write,
{
    match command {
        Command::Domains { query, json } => domains(desk.registry(), query.as_deref(), json, out),
        Command::AddDomain { name, code } => {
            let code = desk.add_domain(&name, &code)?;
            writeln!(out, "Added domain {} ({code}).", name.trim())?;
            writeln!(out, "Domains available: {}", desk.registry().len())?;
            Ok(())
        }
        Command::Preview(args) => preview(desk, args, out),
        Command::Create(args) => create(desk, args, out),
        Command::List { query } => list(desk, query.as_deref().unwrap_or_default(), out),
        Command::Show { id } => {
            let id = EmployeeId::from_raw(id);
            match desk.get(&id) {
                Some(record) => write_card(record, out),
                None => {
                    writeln!(out, "No records found.")?;
                    Ok(())
                }
            }
        }
        Command::Edit(args) => edit(desk, args, out),
        Command::Delete { id } => {
            let id = EmployeeId::from_raw(id);
            match desk.delete(&id)? {
                DeleteOutcome::Removed { count: 1 } => writeln!(out, "Deleted {id}.")?,
                DeleteOutcome::Removed { count } => writeln!(out, "Deleted {count} cards with ID {id}.")?,
                DeleteOutcome::NotFound => writeln!(out, "No card with ID {id}.")?,
            }
            Ok(())
        }
        Command::Years => {
            for year in JoiningYear::selectable() {
                writeln!(out, "{year}")?;
            }
            Ok(())
        }
    }
}

fn domains<W: Write>(
    registry: &DomainRegistry,
    query: Option<&str>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let found = registry.find(query.unwrap_or_default());

    if json {
        let object: IndexMap<&str, u32> =
            found.iter().map(|(name, code)| (*name, code.get())).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&object)?)?;
        return Ok(());
    }

    if found.is_empty() {
        writeln!(out, "No domains match your search.")?;
        return Ok(());
    }
    for (name, code) in &found {
        writeln!(out, "{:0>2}  {name}", code.get())?;
    }
    writeln!(out, "Showing {} of {} domains", found.len(), registry.len())?;
    Ok(())
}

fn preview<R, W>(desk: &IdCardDesk<R>, args: PreviewArgs, out: &mut W) -> Result<()>
where
    R: CardRepository,
    W: Write,
{
    let employee_type: EmployeeType = args.employee_type.parse()?;
    let id = desk.preview(employee_type, &args.year, &args.domain);
    let shown = id.as_ref().map_or(NO_ID, EmployeeId::as_str);
    writeln!(out, "Generated ID: {shown}")?;
    Ok(())
}

fn create<R, W>(desk: &mut IdCardDesk<R>, args: CreateArgs, out: &mut W) -> Result<()>
where
    R: CardRepository,
    W: Write,
{
    let photo = args.photo.as_deref().map(photo::load_data_url).transpose()?;
    let fields = RecordFields {
        name: args.name,
        year_of_joining: args.year,
        employee_type: args.employee_type.parse()?,
        domain_name: args.domain,
        photo,
    };
    warn_if_future_year(&fields.year_of_joining);

    let record = desk.create(fields).context("could not generate ID card")?;
    write_card(&record, out)
}

fn edit<R, W>(desk: &mut IdCardDesk<R>, args: EditArgs, out: &mut W) -> Result<()>
where
    R: CardRepository,
    W: Write,
{
    let target = EmployeeId::from_raw(args.id);
    let employee_type = args
        .employee_type
        .as_deref()
        .map(str::parse::<EmployeeType>)
        .transpose()?;
    let photo = args.photo.as_deref().map(photo::load_data_url).transpose()?;
    if let Some(year) = &args.year {
        warn_if_future_year(year);
    }

    let record = desk
        .edit_with(&target, |fields| {
            if let Some(name) = args.name {
                fields.name = name;
            }
            if let Some(year) = args.year {
                fields.year_of_joining = year;
            }
            if let Some(employee_type) = employee_type {
                fields.employee_type = employee_type;
            }
            if let Some(domain) = args.domain {
                fields.domain_name = domain;
            }
            if photo.is_some() {
                fields.photo = photo;
            } else if args.clear_photo {
                fields.photo = None;
            }
        })
        .with_context(|| format!("could not save changes to {target}"))?;

    if record.employee_id() != &target {
        writeln!(out, "ID changed: {target} -> {}", record.employee_id())?;
    }
    write_card(&record, out)
}

fn list<R, W>(desk: &IdCardDesk<R>, query: &str, out: &mut W) -> Result<()>
where
    R: CardRepository,
    W: Write,
{
    let found = desk.search(query);
    if found.is_empty() {
        writeln!(out, "No records found.")?;
        return Ok(());
    }
    for record in found {
        writeln!(
            out,
            "{}  {} • {}",
            record.employee_id(),
            record.name(),
            record.domain_name()
        )?;
    }
    Ok(())
}

fn write_card<W: Write>(record: &EmployeeRecord, out: &mut W) -> Result<()> {
    writeln!(out, "Company Access ID")?;
    writeln!(out, "  Employee Name:   {}", record.name())?;
    writeln!(out, "  Year of Joining: {}", record.year_of_joining())?;
    writeln!(out, "  Type:            {}", record.employee_type().label())?;
    writeln!(out, "  Domain:          {}", record.domain_label())?;
    writeln!(out, "  Employee ID:     {}", record.employee_id())?;
    let photo = if record.photo().is_some() { "attached" } else { "No Photo" };
    writeln!(out, "  Photo:           {photo}")?;
    Ok(())
}

fn warn_if_future_year(raw: &str) {
    if let Ok(year) = JoiningYear::parse(raw) {
        if year.value() > Utc::now().year() {
            tracing::warn!(%year, "year of joining is in the future");
        }
    }
}
