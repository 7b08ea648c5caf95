use std::str::FromStr;

use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::environment::model::{ClientConfig, License};

/// Features that are only available with a matching license
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumString, AsRefStr, EnumIter)]
pub enum EnterpriseFeature {
    CustomProfileAttributes,
    #[strum(serialize = "LDAP")]
    Ldap,
    #[strum(serialize = "SAML")]
    Saml,
    Cluster,
    DataRetention,
    MessageExport,
    Elasticsearch,
}

impl License {
    pub fn is_licensed(&self) -> bool {
        self.is_licensed == "true"
    }

    pub fn has_feature(&self, feature: EnterpriseFeature) -> bool {
        self.features
            .get(feature.as_ref())
            .map_or(false, |v| v == "true")
    }
}

pub fn has_custom_profile_attributes(license: &License) -> bool {
    license.is_licensed() && license.has_feature(EnterpriseFeature::CustomProfileAttributes)
}

/// Only worth asking the server when the feature is both enabled and licensed
pub fn should_fetch_custom_profile_attributes(config: &ClientConfig, license: &License) -> bool {
    config.service_settings.enable_custom_profile_attributes
        && has_custom_profile_attributes(license)
}

/// Whether the feature called `name` can be used. Names that aren't
/// enterprise features are always available.
pub fn check_enterprise_feature(name: &str, license: &License) -> bool {
    match EnterpriseFeature::from_str(name) {
        Ok(feature) => license.has_feature(feature),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::model::ServiceSettings;
    use strum::IntoEnumIterator;

    fn license(licensed: &str, features: &[(&str, &str)]) -> License {
        License {
            is_licensed: licensed.to_string(),
            features: features
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn custom_profile_attributes_need_license_and_feature() {
        let full = license("true", &[("CustomProfileAttributes", "true")]);
        assert!(has_custom_profile_attributes(&full));
        assert!(!has_custom_profile_attributes(&license(
            "false",
            &[("CustomProfileAttributes", "true")]
        )));
        assert!(!has_custom_profile_attributes(&license("true", &[])));

        let mut config = ClientConfig::default();
        assert!(!should_fetch_custom_profile_attributes(&config, &full));
        config.service_settings = ServiceSettings {
            enable_custom_profile_attributes: true,
        };
        assert!(should_fetch_custom_profile_attributes(&config, &full));
        assert!(!should_fetch_custom_profile_attributes(
            &config,
            &License::default()
        ));
    }

    #[test]
    fn enterprise_features_need_the_feature_flag() {
        let empty = License::default();
        for feature in EnterpriseFeature::iter() {
            assert!(!check_enterprise_feature(feature.as_ref(), &empty));
        }
        let ldap = license("true", &[("LDAP", "true"), ("SAML", "false")]);
        assert!(check_enterprise_feature("LDAP", &ldap));
        assert!(!check_enterprise_feature("SAML", &ldap));
        assert!(check_enterprise_feature("Webhooks", &empty));
    }

    #[test]
    fn license_parses_server_format() {
        let license: License = serde_json::from_str(
            r#"{"IsLicensed": "true", "Features": {"LDAP": "true"}}"#,
        )
        .unwrap();
        assert!(license.is_licensed());
        assert!(license.has_feature(EnterpriseFeature::Ldap));
    }

    #[test]
    fn flat_license_unlocks_its_features() {
        let license: License = serde_json::from_str(
            r#"{"IsLicensed":"true","LDAP":"true","SAML":"true","Cluster":"true","DataRetention":"true","MessageExport":"true","Elasticsearch":"true","CustomProfileAttributes":"true"}"#,
        )
        .unwrap();
        assert!(EnterpriseFeature::iter().all(|f| check_enterprise_feature(f.as_ref(), &license)));
        let config: ClientConfig =
            serde_json::from_str(r#"{"EnableCustomProfileAttributes":"true"}"#).unwrap();
        assert!(should_fetch_custom_profile_attributes(&config, &license));
    }
}
