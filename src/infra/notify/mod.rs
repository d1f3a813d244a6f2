pub mod platform_notifier;

pub use platform_notifier::PlatformNotifier;
