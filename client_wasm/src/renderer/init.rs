use field_core::RenderError;
use web_sys::HtmlCanvasElement;
use wgpu::*;

pub struct WgpuContext {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub config: SurfaceConfiguration,
}

/// `navigator.gpu` present; wgpu cannot recover once it is asked for a
/// WebGPU surface on a browser without one
pub fn webgpu_available() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w.navigator(), &"gpu".into()).unwrap_or(false))
        .unwrap_or(false)
}

pub async fn init_wgpu(canvas: HtmlCanvasElement) -> Result<WgpuContext, RenderError> {
    if !webgpu_available() {
        return Err(RenderError::Initialization(
            "WebGPU not supported by this browser".to_string(),
        ));
    }

    let instance = Instance::new(&InstanceDescriptor {
        backends: Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| RenderError::Initialization("Failed to find adapter".to_string()))?;

    let (device, queue) = adapter
        .request_device(
            &DeviceDescriptor {
                label: Some("Particle Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults(),
                memory_hints: MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| RenderError::Initialization(format!("Failed to create device: {:?}", e)))?;

    // Binds a "webgpu" context to the canvas for good; a 2d context is no
    // longer available after this point
    let width = canvas.width().max(1);
    let height = canvas.height().max(1);
    let surface = instance
        .create_surface(SurfaceTarget::Canvas(canvas))
        .map_err(|e| RenderError::Initialization(format!("Failed to create surface: {:?}", e)))?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first().copied())
        .ok_or_else(|| RenderError::Initialization("No surface formats available".to_string()))?;

    // The page shows through wherever the backdrop is translucent
    let alpha_mode = if surface_caps
        .alpha_modes
        .contains(&CompositeAlphaMode::PreMultiplied)
    {
        CompositeAlphaMode::PreMultiplied
    } else {
        CompositeAlphaMode::Auto
    };

    let config = SurfaceConfiguration {
        usage: TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width,
        height,
        present_mode: PresentMode::Fifo,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    Ok(WgpuContext {
        device,
        queue,
        surface,
        config,
    })
}
