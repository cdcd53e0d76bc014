use super::common::{SheetNamer, join_targets, yes_no};
use crate::Result;
use crate::schema::{AttributeRecord, EntityRecord, SchemaDocument};
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::io::Write;

const SUMMARY_SHEET: &str = "Summary";
const OPTION_SETS_SHEET: &str = "Option Sets";
const DEFAULT_TITLE: &str = "Dataverse Schema Export";
const ALL_METADATA: &str = "(All metadata)";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HEADER_BACKGROUND: Color = Color::RGB(0x00AD_D8E6);

const ENTITY_TABLE_HEADERS: [&str; 5] = ["Logical Name", "Display Name", "Attributes", "Is Custom", "Is Activity"];

const ATTRIBUTE_TABLE_HEADERS: [&str; 11] = [
    "Logical Name",
    "Display Name",
    "Type",
    "Description",
    "Required",
    "Is Custom",
    "Max Length",
    "Format",
    "Min Value",
    "Max Value",
    "Targets",
];

const OPTION_SET_TABLE_HEADERS: [&str; 6] = ["Entity", "Attribute", "Option Set Name", "Is Global", "Value", "Label"];

struct Formats {
    title: Format,
    heading: Format,
    section: Format,
    label: Format,
    header: Format,
    cell: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            title: Format::new().set_bold().set_font_size(16),
            heading: Format::new().set_bold().set_font_size(14),
            section: Format::new().set_bold().set_font_size(12),
            label: Format::new().set_bold(),
            header: Format::new().set_bold().set_background_color(HEADER_BACKGROUND),
            cell: Format::new().set_align(FormatAlign::Left),
        }
    }
}

/// Write the document as a workbook: a summary sheet, one sheet per entity,
/// and a final sheet listing every option set.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Workbook for chaining")]
pub fn generate<W: Write>(document: &SchemaDocument, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();

    let properties = DocProperties::new()
        .set_author("dvschema")
        .set_title(title(document))
        .set_company(&document.organization_name);
    workbook.set_properties(&properties);

    workbook.push_worksheet(summary_sheet(document, &formats)?);

    for (entity, sheet_name) in document.entities.iter().zip(entity_sheet_names(document)) {
        workbook.push_worksheet(entity_sheet(entity, &sheet_name, &formats)?);
    }

    workbook.push_worksheet(option_sets_sheet(document, &formats)?);

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

fn title(document: &SchemaDocument) -> &str {
    document
        .solution_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(DEFAULT_TITLE)
}

/// Worksheet names for the entities, in document order.
fn entity_sheet_names(document: &SchemaDocument) -> Vec<String> {
    let mut namer = SheetNamer::with_reserved([SUMMARY_SHEET, OPTION_SETS_SHEET]);
    document
        .entities
        .iter()
        .map(|entity| namer.assign(&entity.logical_name))
        .collect()
}

#[expect(clippy::cast_precision_loss, reason = "Counts are far below f64's exact integer range")]
const fn count(n: usize) -> f64 {
    n as f64
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_label_value(worksheet: &mut Worksheet, row: u32, label: &str, value: &str, formats: &Formats) -> Result<()> {
    worksheet.write_string_with_format(row, 0, label, &formats.label)?;
    worksheet.write_string_with_format(row, 1, value, &formats.cell)?;
    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_header_row(worksheet: &mut Worksheet, row: u32, headers: &[&str], formats: &Formats) -> Result<()> {
    for (col, header) in (0_u16..).zip(headers) {
        worksheet.write_string_with_format(row, col, *header, &formats.header)?;
    }
    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn summary_sheet(document: &SchemaDocument, formats: &Formats) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SUMMARY_SHEET)?;

    worksheet.write_string_with_format(0, 0, title(document), &formats.title)?;

    let extracted = document.extracted_date.format(TIMESTAMP_FORMAT).to_string();
    write_label_value(&mut worksheet, 2, "Environment:", &document.environment_url, formats)?;
    write_label_value(&mut worksheet, 3, "Organization:", &document.organization_name, formats)?;
    write_label_value(
        &mut worksheet,
        4,
        "Solution:",
        document.solution_name.as_deref().unwrap_or(ALL_METADATA),
        formats,
    )?;
    write_label_value(&mut worksheet, 5, "Extracted:", &extracted, formats)?;

    worksheet.write_string_with_format(7, 0, "Statistics:", &formats.section)?;

    let mut statistics = vec![
        ("Total Entities:", document.entities.len()),
        ("Total Attributes:", document.attribute_count()),
        ("Total Option Sets:", document.option_set_count()),
        ("Total Relationships:", document.relationships.len()),
    ];
    if let Some(components) = &document.solution_components {
        statistics.push(("Solution Components:", components.len()));
    }

    let mut row = 8;
    for (label, value) in statistics {
        worksheet.write_string_with_format(row, 0, label, &formats.label)?;
        worksheet.write_number_with_format(row, 1, count(value), &formats.cell)?;
        row += 1;
    }

    row += 1;
    worksheet.write_string_with_format(row, 0, "Entities", &formats.section)?;
    row += 1;
    write_header_row(&mut worksheet, row, &ENTITY_TABLE_HEADERS, formats)?;
    row += 1;

    for entity in &document.entities {
        worksheet.write_string(row, 0, &entity.logical_name)?;
        worksheet.write_string(row, 1, entity.display_name.as_deref().unwrap_or_default())?;
        worksheet.write_number_with_format(row, 2, count(entity.attributes.len()), &formats.cell)?;
        worksheet.write_string(row, 3, yes_no(entity.is_custom_entity))?;
        worksheet.write_string(row, 4, yes_no(entity.is_activity))?;
        row += 1;
    }

    worksheet.autofit();
    Ok(worksheet)
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn entity_sheet(entity: &EntityRecord, sheet_name: &str, formats: &Formats) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(sheet_name)?;

    worksheet.write_string_with_format(0, 0, "Entity Information", &formats.heading)?;

    let info = [
        ("Logical Name:", entity.logical_name.as_str()),
        ("Display Name:", entity.display_name.as_deref().unwrap_or_default()),
        ("Schema Name:", entity.schema_name.as_str()),
        ("Entity Set Name:", entity.entity_set_name.as_deref().unwrap_or_default()),
        ("Is Custom Entity:", yes_no(entity.is_custom_entity)),
        ("Is Activity:", yes_no(entity.is_activity)),
        ("Primary ID:", entity.primary_id_attribute.as_deref().unwrap_or_default()),
        ("Primary Name:", entity.primary_name_attribute.as_deref().unwrap_or_default()),
        ("Ownership Type:", entity.ownership_type.as_deref().unwrap_or_default()),
        ("Description:", entity.description.as_deref().unwrap_or_default()),
    ];

    let mut row = 1;
    for (label, value) in info {
        write_label_value(&mut worksheet, row, label, value, formats)?;
        row += 1;
    }

    row += 1;
    worksheet.write_string_with_format(row, 0, "Attributes", &formats.section)?;
    row += 1;
    write_header_row(&mut worksheet, row, &ATTRIBUTE_TABLE_HEADERS, formats)?;
    worksheet.set_freeze_panes(row + 1, 1)?;
    row += 1;

    for attr in &entity.attributes {
        write_attribute_row(&mut worksheet, row, attr, formats)?;
        row += 1;
    }

    worksheet.autofit();
    Ok(worksheet)
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_attribute_row(worksheet: &mut Worksheet, row: u32, attr: &AttributeRecord, formats: &Formats) -> Result<()> {
    worksheet.write_string(row, 0, &attr.logical_name)?;
    worksheet.write_string(row, 1, attr.display_name.as_deref().unwrap_or_default())?;
    worksheet.write_string(row, 2, attr.attribute_type.as_deref().unwrap_or_default())?;
    worksheet.write_string(row, 3, attr.description.as_deref().unwrap_or_default())?;
    worksheet.write_string(row, 4, attr.required_level.as_deref().unwrap_or_default())?;
    worksheet.write_string(row, 5, yes_no(attr.is_custom_attribute))?;

    // Type-specific cells stay empty when the attribute does not define them
    if let Some(max_length) = attr.max_length {
        worksheet.write_number_with_format(row, 6, f64::from(max_length), &formats.cell)?;
    }
    if let Some(format) = &attr.format {
        worksheet.write_string(row, 7, format)?;
    }
    if let Some(min_value) = attr.min_value {
        worksheet.write_number_with_format(row, 8, min_value, &formats.cell)?;
    }
    if let Some(max_value) = attr.max_value {
        worksheet.write_number_with_format(row, 9, max_value, &formats.cell)?;
    }
    if attr.targets.is_some() {
        worksheet.write_string(row, 10, join_targets(attr.targets.as_deref(), ", "))?;
    }

    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn option_sets_sheet(document: &SchemaDocument, formats: &Formats) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(OPTION_SETS_SHEET)?;

    write_header_row(&mut worksheet, 0, &OPTION_SET_TABLE_HEADERS, formats)?;
    worksheet.set_freeze_panes(1, 0)?;

    let mut row = 1;
    for entity in &document.entities {
        for attr in &entity.attributes {
            let Some(option_set) = &attr.option_set else {
                continue;
            };

            let mut options: Vec<_> = option_set.options.iter().collect();
            options.sort_by_key(|opt| opt.value);

            for (index, option) in options.into_iter().enumerate() {
                worksheet.write_string(row, 0, &entity.logical_name)?;
                worksheet.write_string(row, 1, &attr.logical_name)?;
                if index == 0 {
                    worksheet.write_string(row, 2, option_set.name.as_deref().unwrap_or_default())?;
                    worksheet.write_string(row, 3, yes_no(option_set.is_global))?;
                }
                worksheet.write_number_with_format(row, 4, f64::from(option.value), &formats.cell)?;
                worksheet.write_string(row, 5, option.label.as_deref().unwrap_or_default())?;
                row += 1;
            }
        }
    }

    worksheet.autofit();
    Ok(worksheet)
}
