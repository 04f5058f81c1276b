fn main() {
    // ESP-IDF environment propagation for device builds; host builds
    // (feature off) have nothing to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
