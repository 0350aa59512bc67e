use crate::view::Scene;

pub trait RenderBackend {
    type Error;

    fn configure_surface(&mut self, width: u32, height: u32);
    fn frame(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}
