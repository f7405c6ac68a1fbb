use std::fs;

use geolabel::annotation::{BoxKind, PolygonOptions};
use geolabel::convert::{convert_geojson, convert_geojson_pair, walk_geojson};
use geolabel::georef::read_raster_metadata;
use geolabel::ir::RingClosure;
use geolabel::GeolabelError;

mod common;

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("read geojson");
    serde_json::from_str(&text).expect("parse geojson")
}

#[test]
fn geotiff_tags_give_origin_and_pixel_size() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let tif = temp.path().join("scene.tif");
    common::write_geotiff(&tif, (300.0, 900.0), (2.0, 3.0));

    let meta = read_raster_metadata(&tif).expect("read metadata");
    assert_eq!((meta.x0, meta.y0, meta.sx, meta.sy), (300.0, 900.0, 2.0, -3.0));
}

#[test]
fn pixel_is_point_rasters_report_the_pixel_corner() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let tif = temp.path().join("scene.tif");
    common::write_geotiff_with_keys(
        &tif,
        (300.0, 900.0),
        (2.0, 3.0),
        Some(&common::PIXEL_IS_POINT_KEYS[..]),
    );

    let meta = read_raster_metadata(&tif).expect("read metadata");
    assert_eq!((meta.x0, meta.y0, meta.sx, meta.sy), (299.0, 901.5, 2.0, -3.0));
}

#[test]
fn world_file_is_used_when_tags_are_absent() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let tif = temp.path().join("scene.tif");
    common::write_plain_tiff(&tif);
    common::write_text(
        &temp.path().join("scene.tfw"),
        "2.0\n0.0\n0.0\n-2.0\n101.0\n199.0\n",
    );

    let meta = read_raster_metadata(&tif).expect("read metadata");
    assert_eq!((meta.x0, meta.y0, meta.sx, meta.sy), (100.0, 200.0, 2.0, -2.0));
}

#[test]
fn raster_without_georeferencing_is_reported() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let tif = temp.path().join("scene.tif");
    common::write_plain_tiff(&tif);

    let err = read_raster_metadata(&tif).unwrap_err();
    assert!(matches!(err, GeolabelError::MissingGeoTransform { .. }));
}

#[test]
fn three_boxes_become_three_features_in_order() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_geotiff(&temp.path().join("scene.tif"), (300.0, 900.0), (2.0, 3.0));
    common::write_text(&temp.path().join("scene.xml"), common::BNDBOX_XML);

    let output = convert_geojson(&temp.path().join("scene.tif"), &PolygonOptions::default())
        .expect("convert");
    assert_eq!(output, temp.path().join("scene.geojson"));

    let json = read_json(&output);
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["name"], "scene");

    let rings = common::feature_rings(&json);
    assert_eq!(rings.len(), 3);
    assert_eq!(
        rings[0],
        vec![(320.0, 840.0), (360.0, 840.0), (360.0, 780.0), (320.0, 780.0)]
    );
    assert_eq!(rings[1][0], (300.0, 900.0));
    assert_eq!(rings[2][0], (400.0, 876.0));

    for feature in json["features"].as_array().expect("features") {
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["properties"], serde_json::json!({}));
        assert_eq!(feature["geometry"]["type"], "Polygon");
    }
}

#[test]
fn identity_transform_keeps_pixel_coordinates() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let tif = temp.path().join("scene.tif");
    common::write_plain_tiff(&tif);
    common::write_text(
        &temp.path().join("scene.tfw"),
        "1.0\n0.0\n0.0\n1.0\n0.5\n0.5\n",
    );
    let xml = temp.path().join("scene.xml");
    common::write_text(&xml, common::BNDBOX_XML);

    let output = convert_geojson_pair(&xml, &tif, &PolygonOptions::default()).expect("convert");
    let rings = common::feature_rings(&read_json(&output));
    assert_eq!(
        rings[0],
        vec![(10.0, 20.0), (30.0, 20.0), (30.0, 40.0), (10.0, 40.0)]
    );
}

#[test]
fn closed_rings_repeat_the_first_vertex() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_geotiff(&temp.path().join("scene.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(&temp.path().join("scene.xml"), common::BNDBOX_XML);

    let options = PolygonOptions {
        closure: RingClosure::Closed,
        ..Default::default()
    };
    let output = convert_geojson(&temp.path().join("scene"), &options).expect("convert");
    let rings = common::feature_rings(&read_json(&output));
    assert!(rings.iter().all(|ring| ring.len() == 5 && ring[0] == ring[4]));
}

#[test]
fn robndbox_geometry_reads_rotated_boxes() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_geotiff(&temp.path().join("scene.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(&temp.path().join("scene.xml"), common::ROBNDBOX_XML);

    let options = PolygonOptions {
        kind: BoxKind::Robndbox,
        ..Default::default()
    };
    let output = convert_geojson(&temp.path().join("scene.xml"), &options).expect("convert");
    let rings = common::feature_rings(&read_json(&output));
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0], vec![(3.0, -4.0), (7.0, -4.0), (7.0, -6.0), (3.0, -6.0)]);
}

#[test]
fn malformed_annotation_leaves_no_output() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_geotiff(&temp.path().join("scene.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(&temp.path().join("scene.xml"), "<annotation><object>");

    let err = convert_geojson(&temp.path().join("scene"), &PolygonOptions::default()).unwrap_err();
    assert!(matches!(err, GeolabelError::XmlParse { .. }));
    assert!(!temp.path().join("scene.geojson").exists());
}

#[test]
fn missing_raster_leaves_no_output() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_text(&temp.path().join("scene.xml"), common::BNDBOX_XML);

    let err = convert_geojson(&temp.path().join("scene"), &PolygonOptions::default()).unwrap_err();
    assert!(matches!(err, GeolabelError::RasterOpen { .. }));
    assert!(!temp.path().join("scene.geojson").exists());
}

#[test]
fn walk_converts_pairs_and_skips_failures() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let root = temp.path();
    common::write_text(&root.join("a.xml"), common::BNDBOX_XML);
    common::write_geotiff(&root.join("a.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(&root.join("nested/b.xml"), common::BNDBOX_XML);
    common::write_geotiff(&root.join("nested/b.tif"), (10.0, 10.0), (1.0, 1.0));
    common::write_text(&root.join("broken.xml"), "<annotation>");
    common::write_geotiff(&root.join("broken.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(&root.join("orphan.xml"), common::BNDBOX_XML);

    let report = walk_geojson(root, &PolygonOptions::default()).expect("walk");
    assert_eq!(report.converted_count(), 2);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.skipped[0].path, root.join("broken.xml"));
    assert!(root.join("a.geojson").is_file());
    assert!(root.join("nested/b.geojson").is_file());
    assert!(!root.join("broken.geojson").exists());
    assert!(!root.join("orphan.geojson").exists());
}

#[test]
fn dotted_stems_resolve_their_own_pair() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let root = temp.path();
    common::write_geotiff(&root.join("tile.v2.tif"), (300.0, 900.0), (2.0, 3.0));
    common::write_text(&root.join("tile.v2.xml"), common::BNDBOX_XML);
    common::write_geotiff(&root.join("tile.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(&root.join("tile.xml"), common::ROBNDBOX_XML);

    let output = convert_geojson(&root.join("tile.v2.tif"), &PolygonOptions::default())
        .expect("convert dotted stem");
    assert_eq!(output, root.join("tile.v2.geojson"));
    let rings = common::feature_rings(&read_json(&output));
    assert_eq!(rings.len(), 3);
    assert_eq!(rings[0][0], (320.0, 840.0));
}

#[test]
fn walk_converts_dotted_stems() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let root = temp.path();
    common::write_geotiff(&root.join("tile.v2.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(&root.join("tile.v2.xml"), common::BNDBOX_XML);

    let report = walk_geojson(root, &PolygonOptions::default()).expect("walk");
    assert_eq!(report.converted, vec![root.join("tile.v2.geojson")]);
    assert_eq!(report.skipped_count(), 0);
    assert!(!root.join("tile.geojson").exists());
}

#[test]
fn non_finite_coordinates_fail_without_output() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_geotiff(&temp.path().join("scene.tif"), (0.0, 0.0), (1.0, 1.0));
    common::write_text(
        &temp.path().join("scene.xml"),
        "<annotation><object><bndbox><xmin>NaN</xmin><ymin>0</ymin><xmax>inf</xmax><ymax>1</ymax></bndbox></object></annotation>",
    );

    let err = convert_geojson(&temp.path().join("scene"), &PolygonOptions::default()).unwrap_err();
    assert!(matches!(err, GeolabelError::Extraction { .. }));
    assert!(!temp.path().join("scene.geojson").exists());
}
