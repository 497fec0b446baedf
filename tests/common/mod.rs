#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use zip::write::SimpleFileOptions;

/// Write a pk3 with the given entries; even entries are deflated, odd ones stored.
pub fn write_pk3(dir: &Path, name: &str, files: &[(&str, Vec<u8>)]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
    for (i, (entry, content)) in files.iter().enumerate() {
        let method = if i % 2 == 0 {
            zip::CompressionMethod::Deflated
        } else {
            zip::CompressionMethod::Stored
        };
        let options = SimpleFileOptions::default().compression_method(method);
        writer.start_file(entry.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    path
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn png(color: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb(color))),
        ImageFormat::Png,
    )
}

pub fn rgba_png() -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 40]))),
        ImageFormat::Png,
    )
}

pub fn jpeg(color: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb(color))),
        ImageFormat::Jpeg,
    )
}

pub fn tga(color: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb(color))),
        ImageFormat::Tga,
    )
}

/// Sorted file names of a directory
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Average color of a decoded image, to tell which source won
pub fn average_color(path: &Path) -> [u8; 3] {
    let image = image::open(path).unwrap().into_rgb8();
    let mut sum = [0u64; 3];
    for pixel in image.pixels() {
        for c in 0..3 {
            sum[c] += pixel[c] as u64;
        }
    }
    let n = (image.width() * image.height()) as u64;
    [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8]
}

pub fn is_jpeg(path: &Path) -> bool {
    let bytes = fs::read(path).unwrap();
    image::guess_format(&bytes).ok() == Some(ImageFormat::Jpeg)
}
