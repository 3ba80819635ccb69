use std::sync::Arc;
use tracing::{debug, error, info, warn};
use vulkano::{
    device::{
        physical::{PhysicalDevice, PhysicalDeviceType},
        Device, DeviceCreateInfo, DeviceExtensions, Queue, QueueCreateInfo, QueueFlags,
    },
    image::{view::ImageView, Image, ImageUsage},
    instance::{Instance, InstanceCreateFlags, InstanceCreateInfo},
    swapchain::{self, Surface, Swapchain, SwapchainCreateInfo, SwapchainPresentInfo},
    sync::{self, GpuFuture},
    Validated, VulkanError, VulkanLibrary,
};
use winit::{dpi::LogicalSize, event_loop::ActiveEventLoop, window::Window};

use crate::RenderError;

pub const WINDOW_TITLE: &str = "Nozzle-Sim: Contour & Isentropic Flow";
const WINDOW_SIZE: (u32, u32) = (1280, 860);

/// Wrap any setup failure with the stage that produced it.
fn setup<E: std::fmt::Debug>(stage: &'static str) -> impl FnOnce(E) -> RenderError {
    move |e| RenderError::Setup {
        stage,
        reason: format!("{e:?}"),
    }
}

/// Vulkan instance, device and swapchain that egui draws the charts into.
pub struct Renderer {
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
    pub surface: Arc<Surface>,
    pub swapchain: Arc<Swapchain>,
    pub image_views: Vec<Arc<ImageView>>,
    pub window: Arc<Window>,
    pub recreate_swapchain: bool,
    previous_frame_end: Option<Box<dyn GpuFuture>>,
}

impl Renderer {
    pub fn new(event_loop: &ActiveEventLoop) -> Result<Self, RenderError> {
        let library = VulkanLibrary::new().map_err(setup("vulkan library"))?;
        let enabled_extensions =
            Surface::required_extensions(event_loop).map_err(setup("surface extensions"))?;
        let instance = Instance::new(
            library,
            InstanceCreateInfo {
                flags: InstanceCreateFlags::ENUMERATE_PORTABILITY,
                enabled_extensions,
                ..Default::default()
            },
        )
        .map_err(setup("instance"))?;

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(WINDOW_TITLE)
                        .with_inner_size(LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1)),
                )
                .map_err(setup("window"))?,
        );
        let surface =
            Surface::from_window(instance.clone(), window.clone()).map_err(setup("surface"))?;

        let device_extensions = DeviceExtensions {
            khr_swapchain: true,
            ..DeviceExtensions::empty()
        };
        let (physical_device, queue_family_index) =
            pick_physical_device(&instance, &surface, &device_extensions)?;
        info!(
            device = %physical_device.properties().device_name,
            kind = ?physical_device.properties().device_type,
            "selected graphics device"
        );

        let (device, mut queues) = Device::new(
            physical_device.clone(),
            DeviceCreateInfo {
                queue_create_infos: vec![QueueCreateInfo {
                    queue_family_index,
                    ..Default::default()
                }],
                enabled_extensions: device_extensions,
                ..Default::default()
            },
        )
        .map_err(setup("logical device"))?;
        let queue = queues.next().ok_or(RenderError::Setup {
            stage: "queue",
            reason: "device returned no queue".to_string(),
        })?;

        let capabilities = physical_device
            .surface_capabilities(&surface, Default::default())
            .map_err(setup("surface capabilities"))?;
        let image_format = physical_device
            .surface_formats(&surface, Default::default())
            .map_err(setup("surface formats"))?
            .first()
            .map(|(format, _)| *format)
            .ok_or(RenderError::Setup {
                stage: "surface formats",
                reason: "surface reports no formats".to_string(),
            })?;
        let composite_alpha = capabilities
            .supported_composite_alpha
            .into_iter()
            .next()
            .ok_or(RenderError::Setup {
                stage: "composite alpha",
                reason: "no supported composite alpha mode".to_string(),
            })?;

        let extent = window.inner_size();
        let (swapchain, images) = Swapchain::new(
            device.clone(),
            surface.clone(),
            SwapchainCreateInfo {
                min_image_count: capabilities.min_image_count.max(2),
                image_format,
                image_extent: [extent.width, extent.height],
                image_usage: ImageUsage::COLOR_ATTACHMENT,
                composite_alpha,
                ..Default::default()
            },
        )
        .map_err(setup("swapchain"))?;
        let image_views = views_for(&images).map_err(setup("image views"))?;

        let previous_frame_end = Some(sync::now(device.clone()).boxed());

        Ok(Renderer {
            device,
            queue,
            surface,
            swapchain,
            image_views,
            window,
            recreate_swapchain: false,
            previous_frame_end,
        })
    }

    pub fn swapchain_format(&self) -> vulkano::format::Format {
        self.swapchain.image_format()
    }

    fn rebuild_swapchain(&mut self) {
        let extent = self.window.inner_size();
        if extent.width == 0 || extent.height == 0 {
            return;
        }
        let rebuilt = self
            .swapchain
            .recreate(SwapchainCreateInfo {
                image_extent: [extent.width, extent.height],
                ..self.swapchain.create_info()
            })
            .map_err(setup("swapchain"))
            .and_then(|(swapchain, images)| {
                let views = views_for(&images).map_err(setup("image views"))?;
                Ok((swapchain, views))
            });

        match rebuilt {
            Ok((swapchain, views)) => {
                debug!(width = extent.width, height = extent.height, "swapchain rebuilt");
                self.swapchain = swapchain;
                self.image_views = views;
                self.recreate_swapchain = false;
            }
            Err(e) => error!("{e}"),
        }
    }

    /// Acquire the next swapchain image, or `None` when the frame must be skipped.
    pub fn begin_frame(&mut self) -> Option<(u32, swapchain::SwapchainAcquireFuture)> {
        if let Some(future) = self.previous_frame_end.as_mut() {
            future.cleanup_finished();
        }
        if self.recreate_swapchain {
            self.rebuild_swapchain();
        }

        match swapchain::acquire_next_image(self.swapchain.clone(), None)
            .map_err(Validated::unwrap)
        {
            Ok((image_index, suboptimal, acquire_future)) => {
                if suboptimal {
                    self.recreate_swapchain = true;
                }
                Some((image_index, acquire_future))
            }
            Err(VulkanError::OutOfDate) => {
                self.recreate_swapchain = true;
                None
            }
            Err(e) => {
                error!("failed to acquire next image: {e}");
                None
            }
        }
    }

    pub fn take_previous_frame_end(&mut self) -> Box<dyn GpuFuture> {
        self.previous_frame_end
            .take()
            .unwrap_or_else(|| sync::now(self.device.clone()).boxed())
    }

    /// Queue presentation of `image_index` after `after_future` and keep the
    /// resulting future for the next frame.
    pub fn present(&mut self, after_future: Box<dyn GpuFuture>, image_index: u32) {
        let future = after_future
            .then_swapchain_present(
                self.queue.clone(),
                SwapchainPresentInfo::swapchain_image_index(self.swapchain.clone(), image_index),
            )
            .then_signal_fence_and_flush();

        let next = match future.map_err(Validated::unwrap) {
            Ok(future) => future.boxed(),
            Err(VulkanError::OutOfDate) => {
                self.recreate_swapchain = true;
                sync::now(self.device.clone()).boxed()
            }
            Err(e) => {
                warn!("failed to flush frame: {e}");
                sync::now(self.device.clone()).boxed()
            }
        };
        self.previous_frame_end = Some(next);
    }
}

/// Prefer a discrete GPU with a graphics queue that can present to `surface`.
fn pick_physical_device(
    instance: &Arc<Instance>,
    surface: &Arc<Surface>,
    extensions: &DeviceExtensions,
) -> Result<(Arc<PhysicalDevice>, u32), RenderError> {
    instance
        .enumerate_physical_devices()
        .map_err(setup("physical devices"))?
        .filter(|p| p.supported_extensions().contains(extensions))
        .filter_map(|p| {
            p.queue_family_properties()
                .iter()
                .enumerate()
                .position(|(i, q)| {
                    q.queue_flags.intersects(QueueFlags::GRAPHICS)
                        && p.surface_support(i as u32, surface).unwrap_or(false)
                })
                .map(|i| (p, i as u32))
        })
        .min_by_key(|(p, _)| match p.properties().device_type {
            PhysicalDeviceType::DiscreteGpu => 0,
            PhysicalDeviceType::IntegratedGpu => 1,
            PhysicalDeviceType::VirtualGpu => 2,
            PhysicalDeviceType::Cpu => 3,
            _ => 4,
        })
        .ok_or(RenderError::Setup {
            stage: "physical devices",
            reason: "no device can present to the window surface".to_string(),
        })
}

fn views_for(images: &[Arc<Image>]) -> Result<Vec<Arc<ImageView>>, Validated<VulkanError>> {
    images
        .iter()
        .map(|image| ImageView::new_default(image.clone()))
        .collect()
}
