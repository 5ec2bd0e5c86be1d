use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APPLICATION_ID: &str = "com.elbanna.chat_app";
pub const DESUGAR_LIBRARY: &str = "com.android.tools:desugar_jdk_libs:2.1.4";
pub const JAVA_VERSION: u32 = 17;
pub const FLUTTER_SOURCE: &str = "../..";

/// Gradle plugins applied to the app module, in application order.
/// The Flutter plugin has to come last.
pub const GRADLE_PLUGINS: [&str; 5] = [
    "com.android.application",
    "com.google.gms.google-services",
    "com.google.firebase.crashlytics",
    "kotlin-android",
    "dev.flutter.flutter-gradle-plugin",
];

/// flutter_local_notifications does not support anything older.
pub const MIN_SUPPORTED_SDK: u32 = 21;

/// Errors raised when the packaging levels are inconsistent
#[derive(Error, Debug, PartialEq)]
pub enum BuildDescriptorError {
    #[error("minSdk {0} is below the supported minimum of {}", MIN_SUPPORTED_SDK)]
    MinSdkTooLow(u32),
    #[error("minSdk {min} is greater than targetSdk {target}")]
    MinAboveTarget { min: u32, target: u32 },
    #[error("targetSdk {target} is greater than compileSdk {compile}")]
    TargetAboveCompile { target: u32, compile: u32 },
}

/// Platform levels provided by the Flutter toolchain rather than fixed here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolchainConfig {
    pub compile_sdk: u32,
    pub target_sdk: u32,
    pub min_sdk: u32,
    pub ndk_version: String,
    pub version_code: u32,
    pub version_name: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compile_sdk: 34,
            target_sdk: 34,
            min_sdk: MIN_SUPPORTED_SDK,
            ndk_version: "23.1.7779620".to_string(),
            version_code: 1,
            version_name: "1.0.0".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SigningStrategy {
    /// Release builds reuse the development keystore.
    DebugKeys,
    ReleaseKeys,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
    pub source_compatibility: u32,
    pub target_compatibility: u32,
    pub jvm_target: u32,
    pub core_library_desugaring: bool,
}

/// Packaging identity of the Android client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    pub plugins: Vec<String>,
    pub namespace: String,
    pub application_id: String,
    #[serde(flatten)]
    pub toolchain: ToolchainConfig,
    pub compile_options: CompileOptions,
    pub desugar_dependency: String,
    pub release_signing: SigningStrategy,
    /// Flutter project root relative to the Android app module
    pub flutter_source: String,
}

impl BuildDescriptor {
    pub fn new(toolchain: ToolchainConfig) -> Self {
        Self {
            plugins: GRADLE_PLUGINS.iter().map(|p| p.to_string()).collect(),
            namespace: APPLICATION_ID.to_string(),
            application_id: APPLICATION_ID.to_string(),
            toolchain,
            compile_options: CompileOptions {
                source_compatibility: JAVA_VERSION,
                target_compatibility: JAVA_VERSION,
                jvm_target: JAVA_VERSION,
                core_library_desugaring: true,
            },
            desugar_dependency: DESUGAR_LIBRARY.to_string(),
            // TODO: switch to ReleaseKeys once the upload keystore is provisioned
            release_signing: SigningStrategy::DebugKeys,
            flutter_source: FLUTTER_SOURCE.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), BuildDescriptorError> {
        let ToolchainConfig { compile_sdk, target_sdk, min_sdk, .. } = self.toolchain;

        if min_sdk < MIN_SUPPORTED_SDK {
            return Err(BuildDescriptorError::MinSdkTooLow(min_sdk));
        }
        if min_sdk > target_sdk {
            return Err(BuildDescriptorError::MinAboveTarget { min: min_sdk, target: target_sdk });
        }
        if target_sdk > compile_sdk {
            return Err(BuildDescriptorError::TargetAboveCompile {
                target: target_sdk,
                compile: compile_sdk,
            });
        }
        Ok(())
    }

    pub fn is_release_signing_temporary(&self) -> bool {
        self.release_signing == SigningStrategy::DebugKeys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_descriptor_is_valid() {
        let descriptor = BuildDescriptor::new(ToolchainConfig::default());
        assert_eq!(descriptor.application_id, "com.elbanna.chat_app");
        assert!(descriptor.compile_options.core_library_desugaring);
        assert!(descriptor.is_release_signing_temporary());
        assert_eq!(descriptor.validate(), Ok(()));
    }

    #[test]
    fn rejects_min_sdk_below_21() {
        let descriptor = BuildDescriptor::new(ToolchainConfig { min_sdk: 19, ..Default::default() });
        assert_eq!(descriptor.validate(), Err(BuildDescriptorError::MinSdkTooLow(19)));
    }

    #[test]
    fn rejects_inverted_levels() {
        let descriptor = BuildDescriptor::new(ToolchainConfig {
            min_sdk: 30,
            target_sdk: 28,
            ..Default::default()
        });
        assert_eq!(
            descriptor.validate(),
            Err(BuildDescriptorError::MinAboveTarget { min: 30, target: 28 })
        );

        let descriptor = BuildDescriptor::new(ToolchainConfig {
            target_sdk: 35,
            compile_sdk: 34,
            ..Default::default()
        });
        assert_eq!(
            descriptor.validate(),
            Err(BuildDescriptorError::TargetAboveCompile { target: 35, compile: 34 })
        );
    }

    #[test]
    fn serializes_toolchain_levels_inline() {
        let json = serde_json::to_value(BuildDescriptor::new(ToolchainConfig::default())).unwrap();
        assert_eq!(json["minSdk"], 21);
        assert_eq!(json["releaseSigning"], "debug_keys");
        assert_eq!(json["desugarDependency"], DESUGAR_LIBRARY);
    }

    #[test]
    fn lists_firebase_plugins_with_flutter_last() {
        let descriptor = BuildDescriptor::new(ToolchainConfig::default());
        assert!(descriptor.plugins.contains(&"com.google.gms.google-services".to_string()));
        assert!(descriptor.plugins.contains(&"com.google.firebase.crashlytics".to_string()));
        assert_eq!(
            descriptor.plugins.last().map(String::as_str),
            Some("dev.flutter.flutter-gradle-plugin")
        );
        assert_eq!(descriptor.flutter_source, "../..");
    }
}
