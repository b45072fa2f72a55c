//! Ball texture maps on the GPU
//!
//! Every slot starts as a 1x1 default texel so the ball can render before
//! (or without) its images. Loaded images replace slots one at a time.

use crate::material::ColorPolicy;
use crate::textures::BallMap;

/// The color map is decoded to linear only when the policy works in linear
/// space; under `Raw` it is sampled as stored, like the hex colors.
pub fn map_format(map: BallMap, policy: ColorPolicy) -> wgpu::TextureFormat {
    if map.is_srgb() && policy.srgb_output() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

pub struct MapTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl MapTexture {
    /// 1x1 texture holding the map's default texel
    pub fn placeholder(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        map: BallMap,
        policy: ColorPolicy,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(map.label()),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: map_format(map, policy),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &map.default_texel(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Upload a decoded browser image
    #[cfg(target_arch = "wasm32")]
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        map: BallMap,
        policy: ColorPolicy,
        image: &web_sys::HtmlImageElement,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.natural_width().max(1),
            height: image.natural_height().max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(map.label()),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: map_format(map, policy),
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Base color, normal and roughness slots bound together at group 2
pub struct MapSet {
    maps: [MapTexture; 3],
}

impl MapSet {
    pub fn placeholders(device: &wgpu::Device, queue: &wgpu::Queue, policy: ColorPolicy) -> Self {
        Self {
            maps: BallMap::ALL.map(|map| MapTexture::placeholder(device, queue, map, policy)),
        }
    }

    pub fn replace(&mut self, map: BallMap, texture: MapTexture) {
        self.maps[map.index()] = texture;
    }

    pub fn layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("map_bind_group_layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.maps[0].view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&self.maps[1].view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&self.maps[2].view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}

pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("map_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_color_map_is_srgb() {
        let pbr = ColorPolicy::LinearizedForPbr;
        assert_eq!(map_format(BallMap::BaseColor, pbr), wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(map_format(BallMap::Normal, pbr), wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(map_format(BallMap::Roughness, pbr), wgpu::TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn test_raw_policy_samples_color_map_as_stored() {
        for map in BallMap::ALL {
            assert_eq!(map_format(map, ColorPolicy::Raw), wgpu::TextureFormat::Rgba8Unorm);
        }
    }
}
