use super::*;
use serial_test::serial;
use crate::device::MockGraphicsDevice;

// ============================================================================
// Engine lifecycle
// ============================================================================

#[test]
#[serial]
fn test_initialize_is_idempotent() {
    Engine::initialize().unwrap();
    Engine::initialize().unwrap();
    Engine::reset_for_testing();
}

#[test]
#[serial]
fn test_create_and_get_graphics_device() {
    Engine::initialize().unwrap();
    Engine::reset_for_testing();

    Engine::create_graphics_device(MockGraphicsDevice::new()).unwrap();
    let device = Engine::graphics_device().unwrap();
    assert!(device.lock().is_ok());

    Engine::reset_for_testing();
}

#[test]
#[serial]
fn test_double_create_fails() {
    Engine::initialize().unwrap();
    Engine::reset_for_testing();

    Engine::create_graphics_device(MockGraphicsDevice::new()).unwrap();
    let result = Engine::create_graphics_device(MockGraphicsDevice::new());
    assert!(matches!(result, Err(Error::InitializationFailed(_))));

    Engine::reset_for_testing();
}

#[test]
#[serial]
fn test_get_without_create_fails() {
    Engine::initialize().unwrap();
    Engine::reset_for_testing();

    assert!(matches!(
        Engine::graphics_device(),
        Err(Error::InitializationFailed(_))
    ));
}

#[test]
#[serial]
fn test_destroy_allows_recreate() {
    Engine::initialize().unwrap();
    Engine::reset_for_testing();

    Engine::create_graphics_device(MockGraphicsDevice::new()).unwrap();
    Engine::destroy_graphics_device().unwrap();
    Engine::create_graphics_device(MockGraphicsDevice::new()).unwrap();

    Engine::reset_for_testing();
}

#[test]
#[serial]
fn test_shutdown_clears_device() {
    Engine::initialize().unwrap();
    Engine::reset_for_testing();

    Engine::create_graphics_device(MockGraphicsDevice::new()).unwrap();
    Engine::shutdown();
    assert!(Engine::graphics_device().is_err());
}
