#![allow(dead_code)]

use std::fs::{self, File};
use std::path::Path;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
const MODEL_TIEPOINT_TAG: u16 = 33922;
const GEO_KEY_DIRECTORY_TAG: u16 = 34735;

/// GeoKey directory declaring `GTRasterTypeGeoKey = PixelIsPoint`.
pub const PIXEL_IS_POINT_KEYS: [u16; 8] = [1, 1, 0, 1, 1025, 0, 1, 2];

/// LabelImg annotation with three axis-aligned boxes.
pub const BNDBOX_XML: &str = r#"<annotation>
  <folder>tiles</folder>
  <filename>scene.tif</filename>
  <size><width>64</width><height>64</height><depth>3</depth></size>
  <object>
    <name>car</name>
    <bndbox><xmin>10</xmin><ymin>20</ymin><xmax>30</xmax><ymax>40</ymax></bndbox>
  </object>
  <object>
    <name>truck</name>
    <bndbox><xmin>0</xmin><ymin>0</ymin><xmax>5</xmax><ymax>5</ymax></bndbox>
  </object>
  <object>
    <name>car</name>
    <bndbox><xmin>50</xmin><ymin>8</ymin><xmax>60</xmax><ymax>12</ymax></bndbox>
  </object>
</annotation>
"#;

/// roLabelImg annotation with two rotated boxes.
pub const ROBNDBOX_XML: &str = r#"<annotation verified="no">
  <filename>scene</filename>
  <object>
    <type>robndbox</type>
    <name>car</name>
    <robndbox><cx>5</cx><cy>5</cy><w>4</w><h>2</h><angle>0</angle></robndbox>
  </object>
  <object>
    <type>robndbox</type>
    <name>boat</name>
    <robndbox><cx>100.5</cx><cy>40.25</cy><w>12</w><h>6</h><angle>3.141592653589793</angle></robndbox>
  </object>
</annotation>
"#;

/// Write `contents` to `path`, creating parent directories.
pub fn write_text(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write file");
}

/// Write a small grayscale TIFF with no georeferencing tags.
pub fn write_plain_tiff(path: &Path) {
    let file = File::create(path).expect("create tiff");
    let mut encoder = TiffEncoder::new(file).expect("tiff encoder");
    let data = vec![0u8; 4 * 4];
    encoder
        .write_image::<colortype::Gray8>(4, 4, &data)
        .expect("write tiff image");
}

/// Write a grayscale GeoTIFF whose top-left corner sits at `origin` with
/// pixel size `scale` (ScaleY positive, north-up).
pub fn write_geotiff(path: &Path, origin: (f64, f64), scale: (f64, f64)) {
    write_geotiff_with_keys(path, origin, scale, None);
}

/// Like [`write_geotiff`], optionally adding a GeoKey directory.
pub fn write_geotiff_with_keys(
    path: &Path,
    origin: (f64, f64),
    scale: (f64, f64),
    geo_keys: Option<&[u16]>,
) {
    let file = File::create(path).expect("create tiff");
    let mut encoder = TiffEncoder::new(file).expect("tiff encoder");
    let mut image = encoder
        .new_image::<colortype::Gray8>(4, 4)
        .expect("tiff image");

    let pixel_scale = [scale.0, scale.1, 0.0];
    let tiepoint = [0.0, 0.0, 0.0, origin.0, origin.1, 0.0];
    image
        .encoder()
        .write_tag(Tag::from_u16_exhaustive(MODEL_PIXEL_SCALE_TAG), &pixel_scale[..])
        .expect("write pixel scale tag");
    image
        .encoder()
        .write_tag(Tag::from_u16_exhaustive(MODEL_TIEPOINT_TAG), &tiepoint[..])
        .expect("write tiepoint tag");
    if let Some(keys) = geo_keys {
        image
            .encoder()
            .write_tag(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY_TAG), keys)
            .expect("write geokey directory");
    }

    let data = vec![0u8; 4 * 4];
    image.write_data(&data).expect("write tiff data");
}

/// Exterior ring of every feature as `(x, y)` pairs.
pub fn feature_rings(geojson: &serde_json::Value) -> Vec<Vec<(f64, f64)>> {
    geojson["features"]
        .as_array()
        .expect("features array")
        .iter()
        .map(|feature| {
            feature["geometry"]["coordinates"][0]
                .as_array()
                .expect("exterior ring")
                .iter()
                .map(|point| {
                    (
                        point[0].as_f64().expect("x"),
                        point[1].as_f64().expect("y"),
                    )
                })
                .collect()
        })
        .collect()
}
