//! Material texture loading

use spot_core::{TextureFilter, TextureRef, TextureWrap};

use crate::error::TextureError;

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Tightly packed RGBA8 rows
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// 2x2 light/dark checker used when the texture file is unavailable
    pub fn fallback_checker() -> Self {
        const LIGHT: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
        const DARK: [u8; 4] = [0x80, 0x80, 0x80, 0xff];
        Self {
            width: 2,
            height: 2,
            pixels: [LIGHT, DARK, DARK, LIGHT].concat(),
        }
    }
}

/// Decode an image file to RGBA8
pub fn load_image(path: &str) -> Result<ImageData, TextureError> {
    let image = image::open(path)
        .map_err(|e| TextureError::Load {
            path: path.to_string(),
            message: e.to_string(),
        })?
        .to_rgba8();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty(path.to_string()));
    }

    Ok(ImageData {
        width,
        height,
        pixels: image.into_raw(),
    })
}

/// Load the texture's image, falling back to a generated checker on failure
pub fn load_or_fallback(texture: &TextureRef) -> ImageData {
    match load_image(&texture.path) {
        Ok(image) => {
            tracing::info!(
                "Loaded texture {} ({}x{})",
                texture.path,
                image.width,
                image.height
            );
            image
        }
        Err(e) => {
            tracing::warn!("{}; using generated checker", e);
            ImageData::fallback_checker()
        }
    }
}

/// GPU texture with its view and sampler
pub struct GpuTexture {
    /// Texture handle
    pub texture: wgpu::Texture,
    /// Full view
    pub view: wgpu::TextureView,
    /// Sampler matching the material's wrap and filter settings
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Upload an image with the sampling settings of `texture`
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &ImageData,
        texture: &TextureRef,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let format = if texture.srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&texture.path),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, texture);

        Self {
            texture: gpu_texture,
            view,
            sampler,
        }
    }

    /// 1x1 white texture for untextured materials
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let image = ImageData {
            width: 1,
            height: 1,
            pixels: vec![0xff; 4],
        };
        let texture = TextureRef {
            path: "White Texture".to_string(),
            wrap_s: TextureWrap::ClampToEdge,
            wrap_t: TextureWrap::ClampToEdge,
            mag_filter: TextureFilter::Nearest,
            repeat: glam::Vec2::ONE,
            srgb: true,
        };
        Self::upload(device, queue, &image, &texture)
    }
}

fn create_sampler(device: &wgpu::Device, texture: &TextureRef) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Material Sampler"),
        address_mode_u: address_mode(texture.wrap_s),
        address_mode_v: address_mode(texture.wrap_t),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter_mode(texture.mag_filter),
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

fn address_mode(wrap: TextureWrap) -> wgpu::AddressMode {
    match wrap {
        TextureWrap::Repeat => wgpu::AddressMode::Repeat,
        TextureWrap::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

fn filter_mode(filter: TextureFilter) -> wgpu::FilterMode {
    match filter {
        TextureFilter::Nearest => wgpu::FilterMode::Nearest,
        TextureFilter::Linear => wgpu::FilterMode::Linear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_checker_layout() {
        let image = ImageData::fallback_checker();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.pixels.len(), 16);
        assert_eq!(image.pixels[0..4], image.pixels[12..16]);
        assert_ne!(image.pixels[0..4], image.pixels[4..8]);
    }

    #[test]
    fn test_bundled_checker_matches_fallback() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/images/checker.png");
        let image = load_image(path).unwrap();
        assert_eq!(image, ImageData::fallback_checker());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_image("does/not/exist.png").unwrap_err();
        assert!(matches!(err, TextureError::Load { .. }));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let texture = TextureRef {
            path: "does/not/exist.png".to_string(),
            wrap_s: TextureWrap::Repeat,
            wrap_t: TextureWrap::Repeat,
            mag_filter: TextureFilter::Nearest,
            repeat: glam::Vec2::splat(20.0),
            srgb: true,
        };
        assert_eq!(load_or_fallback(&texture), ImageData::fallback_checker());
    }

    #[test]
    fn test_sampler_modes() {
        assert_eq!(address_mode(TextureWrap::Repeat), wgpu::AddressMode::Repeat);
        assert_eq!(filter_mode(TextureFilter::Nearest), wgpu::FilterMode::Nearest);
    }
}
