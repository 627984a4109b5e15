use dse_core::dse::{DseError, DseIndex, DseRecord};
use dse_core::table::{Column, FieldInfo, FieldType, Table, TableSchema};

const P1: &str = "urn:cts:compnov:bible.genesis.sept_latin:1.1";
const P2: &str = "urn:cts:compnov:bible.genesis.sept_latin:1.2";
const P3: &str = "urn:cts:compnov:bible.genesis.sept_latin:2.1";

const IMG1: &str = "urn:cite2:hmt:vaimg.2017a:VA012RN_0013@10,20,30,40";
const IMG2: &str = "urn:cite2:hmt:vaimg.2017a:VA012RN_0013@50,60,70,80";
const IMG_WHOLE: &str = "urn:cite2:hmt:vaimg.2017a:VA012RN_0013";
const IMG3: &str = "urn:cite2:hmt:vaimg.2017a:VA013RN_0014";

const S1: &str = "urn:cite2:hmt:msA.v1:12r";
const S2: &str = "urn:cite2:hmt:msA.v1:12v";

fn record(passage: &str, image: &str, surface: &str) -> DseRecord {
    DseRecord {
        passage: passage.to_string(),
        image: image.to_string(),
        surface: surface.to_string(),
    }
}

/// Five rows, including an exact duplicate of the first, two ROIs on one
/// whole image, and one image shared by two passages.
fn fixture() -> DseIndex {
    DseIndex::from_records([
        record(P1, IMG1, S1),
        record(P2, IMG2, S1),
        record(P2, IMG3, S2),
        record(P3, IMG3, S2),
        record(P1, IMG1, S1),
    ])
    .unwrap()
}

#[test]
fn construction_derives_image_decomposition() {
    let index = fixture();
    let row = &index.rows()[0];
    assert_eq!(row.wholeimage, IMG_WHOLE);
    assert_eq!(row.roi.as_deref(), Some("10,20,30,40"));
    let rect = row.rect.unwrap();
    assert_eq!(rect.x, 10.0);
    assert_eq!(rect.y, 20.0);
    assert_eq!(rect.w, 30.0);
    assert_eq!(rect.h, 40.0);

    let bare = &index.rows()[2];
    assert_eq!(bare.wholeimage, IMG3);
    assert_eq!(bare.roi, None);
    assert_eq!(bare.rect, None);
}

#[test]
fn construction_rejects_roi_with_wrong_arity() {
    let result = DseIndex::from_records([record(
        P1,
        "urn:cite2:hmt:vaimg.2017a:VA012RN_0013@10,20,30",
        S1,
    )]);
    let err = result.unwrap_err();
    assert!(matches!(err, DseError::InvalidRoi(_)));
    assert!(err
        .to_string()
        .contains("ROI must have four comma-separated numeric values (x,y,w,h)"));
}

#[test]
fn construction_rejects_non_numeric_roi_values() {
    let result = DseIndex::from_records([
        record(P1, IMG1, S1),
        record(P2, "urn:cite2:hmt:vaimg.2017a:VA012RN_0013@10,abc,30,40", S1),
    ]);
    assert!(matches!(result, Err(DseError::InvalidRoi(_))));
}

#[test]
fn surfaces_are_unique() {
    assert_eq!(fixture().surfaces(), vec![S1.to_string(), S2.to_string()]);
}

#[test]
fn images_inventory_drops_roi() {
    assert_eq!(
        fixture().images(),
        vec![IMG_WHOLE.to_string(), IMG3.to_string()]
    );
}

#[test]
fn texts_collapse_passages_to_text_level() {
    assert_eq!(
        fixture().texts(),
        vec!["urn:cts:compnov:bible.genesis.sept_latin:".to_string()]
    );
}

#[test]
fn texts_agree_with_per_row_collapsing() {
    let index = fixture();
    let mut expected: Vec<String> = index
        .rows()
        .iter()
        .map(|r| dse_core::citation::collapse_passage(&r.passage))
        .collect();
    expected.sort();
    expected.dedup();
    assert_eq!(index.texts(), expected);
}

#[test]
fn surfaces_for_image_ignores_query_roi() {
    let index = fixture();
    // Any ROI on the query resolves to the same whole image.
    assert_eq!(index.surfaces_for_image(IMG1), vec![S1.to_string()]);
    assert_eq!(
        index.surfaces_for_image("urn:cite2:hmt:vaimg.2017a:VA012RN_0013@99,99,9,9"),
        vec![S1.to_string()]
    );
    assert_eq!(index.surfaces_for_image(IMG_WHOLE), vec![S1.to_string()]);
}

#[test]
fn surfaces_for_passage_keeps_duplicates() {
    assert_eq!(
        fixture().surfaces_for_passage(P1),
        vec![S1.to_string(), S1.to_string()]
    );
}

#[test]
fn images_for_passage_returns_raw_values_in_row_order() {
    assert_eq!(
        fixture().images_for_passage(P2),
        vec![IMG2.to_string(), IMG3.to_string()]
    );
}

#[test]
fn images_for_surface_deduplicates_on_raw_value_only() {
    let index = fixture();
    // Rows 1, 2, 5 document S1: IMG1 twice plus IMG2. Distinct ROIs on
    // the same whole image stay distinct.
    assert_eq!(
        index.images_for_surface(S1),
        vec![IMG1.to_string(), IMG2.to_string()]
    );
    assert_eq!(
        index.wholeimages_for_surface(S1),
        vec![IMG_WHOLE.to_string()]
    );
}

#[test]
fn wholeimages_for_passage_normalizes_and_deduplicates() {
    assert_eq!(
        fixture().wholeimages_for_passage(P2),
        vec![IMG_WHOLE.to_string(), IMG3.to_string()]
    );
}

#[test]
fn passages_for_surface_is_unique() {
    assert_eq!(
        fixture().passages_for_surface(S2),
        vec![P2.to_string(), P3.to_string()]
    );
}

#[test]
fn passages_for_image_matches_the_exact_image_string() {
    let index = fixture();
    // ROI-bearing query matches only rows carrying exactly that ROI.
    assert_eq!(
        index.passages_for_image(IMG1),
        vec![P1.to_string(), P1.to_string()]
    );
    // A bare whole-image query matches only rows without an ROI suffix.
    assert_eq!(index.passages_for_image(IMG_WHOLE), Vec::<String>::new());
    assert_eq!(
        index.passages_for_image(IMG3),
        vec![P2.to_string(), P3.to_string()]
    );
}

#[test]
fn queries_return_empty_for_unknown_keys_without_error() {
    let index = fixture();
    assert!(index.surfaces_for_passage("urn:cts:none:a.b:9").is_empty());
    assert!(index.images_for_surface("urn:cite2:none:x.y:z").is_empty());
}

#[test]
fn rois_preserve_row_order_and_duplicates() {
    assert_eq!(
        fixture().rois(),
        vec!["10,20,30,40", "50,60,70,80", "10,20,30,40"]
    );
}

#[test]
fn from_table_accepts_delimited_input() {
    let text = format!(
        "passage|image|surface\n{P1}|{IMG1}|{S1}\n{P2}|{IMG3}|{S2}\n"
    );
    let table = Table::from_delimited(&text, '|').unwrap();
    let index = DseIndex::from_table(&table).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.rows()[0].roi.as_deref(), Some("10,20,30,40"));
    assert_eq!(index.passages_for_surface(S2), vec![P2.to_string()]);
}

#[test]
fn from_table_rejects_missing_required_column() {
    let table = Table::from_delimited("passage|image\na|b\n", '|').unwrap();
    let err = DseIndex::from_table(&table).unwrap_err();
    assert!(matches!(err, DseError::Schema(_)));
    assert!(err.to_string().contains("surface"));
}

#[test]
fn from_table_rejects_mistyped_required_column() {
    let schema = TableSchema::new(vec![
        FieldInfo {
            name: "passage".to_string(),
            field_type: FieldType::Int64,
            nullable: false,
        },
        FieldInfo {
            name: "image".to_string(),
            field_type: FieldType::String,
            nullable: false,
        },
        FieldInfo {
            name: "surface".to_string(),
            field_type: FieldType::String,
            nullable: false,
        },
    ]);
    let columns = vec![
        Column::Int64(vec![Some(1)]),
        Column::String(vec![Some(IMG3.to_string())]),
        Column::String(vec![Some(S1.to_string())]),
    ];
    let table = Table::new(schema, columns).unwrap();
    assert!(matches!(
        DseIndex::from_table(&table),
        Err(DseError::Schema(_))
    ));
}

#[test]
fn from_table_rejects_null_cells() {
    let schema = TableSchema::new(vec![
        FieldInfo {
            name: "passage".to_string(),
            field_type: FieldType::String,
            nullable: true,
        },
        FieldInfo {
            name: "image".to_string(),
            field_type: FieldType::String,
            nullable: false,
        },
        FieldInfo {
            name: "surface".to_string(),
            field_type: FieldType::String,
            nullable: false,
        },
    ]);
    let columns = vec![
        Column::String(vec![Some(P1.to_string()), None]),
        Column::String(vec![Some(IMG3.to_string()), Some(IMG3.to_string())]),
        Column::String(vec![Some(S1.to_string()), Some(S1.to_string())]),
    ];
    let table = Table::new(schema, columns).unwrap();
    assert!(matches!(
        DseIndex::from_table(&table),
        Err(DseError::Schema(_))
    ));
}

#[test]
fn empty_table_builds_an_empty_index() {
    let index = DseIndex::from_records([]).unwrap();
    assert!(index.is_empty());
    assert!(index.surfaces().is_empty());
    assert!(index.texts().is_empty());
    assert!(index.rois().is_empty());
}
