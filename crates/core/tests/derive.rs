use chrono::{DateTime, FixedOffset, NaiveDate};
use xlbind_core::{
    construct, extract_fields, unmarshal_records, BindError, FieldKind, FieldValues, Record,
    SheetOptions, Value,
};
use xlbind_sheet::Sheet;

#[derive(Debug, Record)]
struct Everything {
    flag: bool,
    tiny: i8,
    small: i16,
    medium: i32,
    large: i64,
    pointer: isize,
    utiny: u8,
    usmall: u16,
    umedium: u32,
    ularge: u64,
    upointer: usize,
    single: f32,
    double: f64,
    label: String,
    day: NaiveDate,
    #[column = "time=%Y-%m-%d %H:%M:%S"]
    stamp: DateTime<FixedOffset>,
}

const EVERYTHING_HEADINGS: [&str; 16] = [
    "flag", "tiny", "small", "medium", "large", "pointer", "utiny", "usmall", "umedium", "ularge",
    "upointer", "single", "double", "label", "day", "stamp",
];

#[test]
fn test_derived_fields() {
    let fields = Everything::fields();

    assert_eq!(Everything::type_name(), "Everything");
    assert_eq!(fields.len(), 16);
    assert_eq!(fields[0].name, "flag");
    assert_eq!(fields[0].kind, FieldKind::Bool);
    assert_eq!(fields[13].kind, FieldKind::Text);
    assert_eq!(fields[14].kind, FieldKind::Date);
    assert_eq!(fields[15].kind, FieldKind::DateTime);
    assert_eq!(fields[15].tag, Some("time=%Y-%m-%d %H:%M:%S"));
    assert!(fields.iter().all(|f| f.exported));
}

#[test]
fn test_every_kind() {
    let sheet = Sheet::from_data(vec![
        EVERYTHING_HEADINGS.to_vec(),
        vec![
            "TRUE",
            "-8",
            "-1600",
            "320000",
            "-6400000000",
            "-64",
            "255",
            "65535",
            "4000000000",
            "18000000000000000000",
            "42",
            "1.5",
            "2.25",
            "Pencil",
            "2021-01-06",
            "2021-01-06 08:30:00",
        ],
    ]);

    let rows: Vec<Everything> = unmarshal_records(&sheet, &SheetOptions::default()).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];

    assert!(row.flag);
    assert_eq!(row.tiny, -8);
    assert_eq!(row.small, -1600);
    assert_eq!(row.medium, 320_000);
    assert_eq!(row.large, -6_400_000_000);
    assert_eq!(row.pointer, -64);
    assert_eq!(row.utiny, 255);
    assert_eq!(row.usmall, 65535);
    assert_eq!(row.umedium, 4_000_000_000);
    assert_eq!(row.ularge, 18_000_000_000_000_000_000);
    assert_eq!(row.upointer, 42);
    assert!((row.single - 1.5).abs() < f32::EPSILON);
    assert!((row.double - 2.25).abs() < f64::EPSILON);
    assert_eq!(row.label, "Pencil");
    assert_eq!(row.day, NaiveDate::from_ymd_opt(2021, 1, 6).unwrap());
    assert_eq!(row.stamp.to_rfc3339(), "2021-01-06T08:30:00+00:00");
}

#[test]
fn test_overflow_is_unsupported_value() {
    let mut values = vec![""; 16];
    values[6] = "256";
    let sheet = Sheet::from_data(vec![EVERYTHING_HEADINGS.to_vec(), values]);

    let err = unmarshal_records::<Everything, _>(&sheet, &SheetOptions::default()).unwrap_err();

    assert!(matches!(err, BindError::FieldCoercion { ref field, .. } if field == "utiny"));
    assert!(matches!(err.root_cause(), BindError::UnsupportedValue { value } if value == "256"));
}

#[derive(Debug, Default, PartialEq)]
struct Notes(Vec<String>);

#[derive(Debug, PartialEq, Record)]
struct Annotated {
    #[column = "heading=Type"]
    r#type: String,
    #[column(skip)]
    notes: Notes,
}

#[test]
fn test_skip_and_raw_identifiers() {
    let fields = extract_fields::<Annotated>().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name(), "type");
    assert_eq!(fields[0].heading(), "Type");

    let sheet = Sheet::from_data(vec![vec!["Type", "notes"], vec!["pen", "ignored"]]);
    let rows: Vec<Annotated> = unmarshal_records(&sheet, &SheetOptions::default()).unwrap();

    assert_eq!(
        rows,
        vec![Annotated {
            r#type: "pen".to_string(),
            notes: Notes::default(),
        }]
    );
}

#[allow(dead_code)]
#[derive(Debug, Record)]
struct Tagged {
    #[column = "heading=Region"]
    region: String,
    tags: Vec<String>,
}

#[test]
fn test_unsupported_field_kind() {
    let fields = Tagged::fields();
    assert_eq!(fields[1].kind, FieldKind::Unsupported("Vec<String>"));

    let sheet = Sheet::from_data(vec![vec!["Region", "tags"], vec!["East", "a"]]);
    let err = unmarshal_records::<Tagged, _>(&sheet, &SheetOptions::default()).unwrap_err();

    match err.root_cause() {
        BindError::UnsupportedField {
            field,
            type_name,
            heading,
        } => {
            assert_eq!(field, "tags");
            assert_eq!(*type_name, "Vec<String>");
            assert_eq!(heading, "tags");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unsupported_field_fails_on_empty_sheet() {
    let sheet = Sheet::from_data(vec![vec!["Region"]]);
    let err = unmarshal_records::<Tagged, _>(&sheet, &SheetOptions::default()).unwrap_err();
    assert!(matches!(err.root_cause(), BindError::UnsupportedField { .. }));
}

#[test]
fn test_construct_rejects_unsupported_value() {
    let mut values = FieldValues::new();
    values.insert("region", "East");
    values.insert("tags", Value::Text("a".to_string()));

    let err = construct::<Tagged>(values).unwrap_err();
    assert!(matches!(
        err,
        BindError::InvalidFieldValueType { expected: "Vec<String>", actual: "String", .. }
    ));
}
