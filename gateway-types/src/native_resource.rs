use gateway_codec::{check_decimal, nested_each, record, tagged_union, Validate, Violation};

record! {
    pub struct NativeResourceXrdValue: "kind" = "Xrd" {}
}

record! {
    pub struct NativeResourcePackageOwnerBadgeValue: "kind" = "PackageOwnerBadge" {}
}

record! {
    pub struct NativeResourceAccountOwnerBadgeValue: "kind" = "AccountOwnerBadge" {}
}

record! {
    pub struct NativeResourceIdentityOwnerBadgeValue: "kind" = "IdentityOwnerBadge" {}
}

record! {
    pub struct NativeResourceValidatorOwnerBadgeValue: "kind" = "ValidatorOwnerBadge" {}
}

record! {
    pub struct NativeResourceSecp256k1SignatureResourceValue: "kind" = "Secp256k1SignatureResource" {}
}

record! {
    pub struct NativeResourceEd25519SignatureResourceValue: "kind" = "Ed25519SignatureResource" {}
}

record! {
    pub struct NativeResourceGlobalCallerResourceValue: "kind" = "GlobalCallerResource" {}
}

record! {
    pub struct NativeResourcePackageOfDirectCallerResourceValue: "kind" = "PackageOfDirectCallerResource" {}
}

record! {
    pub struct NativeResourceSystemExecutionResourceValue: "kind" = "SystemExecutionResource" {}
}

record! {
    pub struct NativeResourceAccessControllerRecoveryBadgeValue: "kind" = "AccessControllerRecoveryBadge" {
        access_controller_address: required String,
    }
}

record! {
    pub struct NativeResourceValidatorClaimNftValue: "kind" = "ValidatorClaimNft" {
        validator_address: required String,
    }
}

record! {
    /// How much of one underlying resource a single unit redeems for.
    pub struct NativeResourceRedemptionValueItem {
        resource_address: required String,
        /// Decimal string; absent when the pool holds none of the resource.
        amount: optional String,
    }
}

record! {
    pub struct NativeResourceValidatorLiquidStakeUnitValue: "kind" = "ValidatorLiquidStakeUnit" {
        validator_address: required String,
        redemption_resource_count: required i32,
        unit_redemption_value: required Vec<NativeResourceRedemptionValueItem>,
    }
}

record! {
    pub struct NativeResourceOneResourcePoolUnitValue: "kind" = "OneResourcePoolUnit" {
        pool_address: required String,
        redemption_resource_count: required i32,
        unit_redemption_value: required Vec<NativeResourceRedemptionValueItem>,
    }
}

record! {
    pub struct NativeResourceTwoResourcePoolUnitValue: "kind" = "TwoResourcePoolUnit" {
        pool_address: required String,
        redemption_resource_count: required i32,
        unit_redemption_value: required Vec<NativeResourceRedemptionValueItem>,
    }
}

record! {
    pub struct NativeResourceMultiResourcePoolUnitValue: "kind" = "MultiResourcePoolUnit" {
        pool_address: required String,
        redemption_resource_count: required i32,
        unit_redemption_value: required Vec<NativeResourceRedemptionValueItem>,
    }
}

tagged_union! {
    /// Well-known resources created by the network itself, discriminated by `kind`.
    pub enum NativeResourceDetails {
        discriminator = "kind",
        kind = NativeResourceKind,
        type_name_aliases = false,
        variants = {
            Xrd(NativeResourceXrdValue),
            PackageOwnerBadge(NativeResourcePackageOwnerBadgeValue),
            AccountOwnerBadge(NativeResourceAccountOwnerBadgeValue),
            IdentityOwnerBadge(NativeResourceIdentityOwnerBadgeValue),
            ValidatorOwnerBadge(NativeResourceValidatorOwnerBadgeValue),
            Secp256k1SignatureResource(NativeResourceSecp256k1SignatureResourceValue),
            Ed25519SignatureResource(NativeResourceEd25519SignatureResourceValue),
            GlobalCallerResource(NativeResourceGlobalCallerResourceValue),
            PackageOfDirectCallerResource(NativeResourcePackageOfDirectCallerResourceValue),
            SystemExecutionResource(NativeResourceSystemExecutionResourceValue),
            AccessControllerRecoveryBadge(NativeResourceAccessControllerRecoveryBadgeValue),
            ValidatorClaimNft(NativeResourceValidatorClaimNftValue),
            ValidatorLiquidStakeUnit(NativeResourceValidatorLiquidStakeUnitValue),
            OneResourcePoolUnit(NativeResourceOneResourcePoolUnitValue),
            TwoResourcePoolUnit(NativeResourceTwoResourcePoolUnitValue),
            MultiResourcePoolUnit(NativeResourceMultiResourcePoolUnitValue),
        }
    }
}

impl NativeResourceDetails {
    /// Redemption values of stake and pool units, `None` for every other kind.
    #[must_use]
    pub fn unit_redemption_value(&self) -> Option<&[NativeResourceRedemptionValueItem]> {
        match self {
            Self::ValidatorLiquidStakeUnit(unit) => Some(unit.unit_redemption_value()),
            Self::OneResourcePoolUnit(unit) => Some(unit.unit_redemption_value()),
            Self::TwoResourcePoolUnit(unit) => Some(unit.unit_redemption_value()),
            Self::MultiResourcePoolUnit(unit) => Some(unit.unit_redemption_value()),
            _ => None,
        }
    }

    fn redemption_resource_count(&self) -> Option<i32> {
        match self {
            Self::ValidatorLiquidStakeUnit(unit) => Some(*unit.redemption_resource_count()),
            Self::OneResourcePoolUnit(unit) => Some(*unit.redemption_resource_count()),
            Self::TwoResourcePoolUnit(unit) => Some(*unit.redemption_resource_count()),
            Self::MultiResourcePoolUnit(unit) => Some(*unit.redemption_resource_count()),
            _ => None,
        }
    }
}

impl Validate for NativeResourceRedemptionValueItem {
    fn validate(&self) -> Vec<Violation> {
        self.amount().and_then(|amount| check_decimal("amount", amount)).into_iter().collect()
    }
}

impl Validate for NativeResourceDetails {
    fn validate(&self) -> Vec<Violation> {
        let (Some(count), Some(items)) =
            (self.redemption_resource_count(), self.unit_redemption_value())
        else {
            return Vec::new();
        };
        let mut violations = Vec::new();
        if usize::try_from(count).ok() != Some(items.len()) {
            violations.push(Violation::new(
                "redemption_resource_count",
                format!("is {count} but unit_redemption_value has {} entries", items.len()),
            ));
        }
        violations.extend(nested_each("unit_redemption_value", items));
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_codec::{CodecError, Decode, Encode, TaggedValue};
    use serde_json::{json, Value};

    fn sample(kind: NativeResourceKind) -> Value {
        let units = json!({
            "redemption_resource_count": 1,
            "unit_redemption_value": [{ "resource_address": "resource_rdx1a", "amount": "2.5" }],
        });
        let body = match kind {
            NativeResourceKind::AccessControllerRecoveryBadge => {
                json!({ "access_controller_address": "accesscontroller_rdx1c" })
            },
            NativeResourceKind::ValidatorClaimNft => json!({ "validator_address": "validator_rdx1s" }),
            NativeResourceKind::ValidatorLiquidStakeUnit => {
                let mut body = json!({ "validator_address": "validator_rdx1s" });
                if let (Value::Object(body), Value::Object(units)) = (&mut body, units) {
                    body.extend(units);
                }
                body
            },
            NativeResourceKind::OneResourcePoolUnit |
            NativeResourceKind::TwoResourcePoolUnit |
            NativeResourceKind::MultiResourcePoolUnit => {
                let mut body = json!({ "pool_address": "pool_rdx1c5" });
                if let (Value::Object(body), Value::Object(units)) = (&mut body, units) {
                    body.extend(units);
                }
                body
            },
            _ => json!({}),
        };
        let mut doc = json!({ "kind": kind.as_str() });
        if let (Value::Object(doc), Value::Object(body)) = (&mut doc, body) {
            doc.extend(body);
        }
        doc
    }

    #[test]
    fn package_owner_badge_has_no_fields() {
        let details =
            NativeResourceDetails::decode_value(&json!({ "kind": "PackageOwnerBadge" })).unwrap();
        assert_eq!(details.tag(), NativeResourceKind::PackageOwnerBadge);
        assert_eq!(details.to_value(), json!({ "kind": "PackageOwnerBadge" }));
        assert_eq!(details.unit_redemption_value(), None);
        assert_eq!(
            details,
            NativeResourceDetails::from(NativeResourcePackageOwnerBadgeValue::new())
        );
        assert_ne!(details, NativeResourceDetails::from(NativeResourceAccountOwnerBadgeValue::new()));
    }

    #[test]
    fn every_kind_round_trips() {
        let registry = NativeResourceDetails::registry();
        assert_eq!(registry.discriminator(), "kind");
        assert_eq!(registry.tags().count(), 16);
        assert_eq!(NativeResourceKind::ALL.len(), 16);
        for &kind in NativeResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<NativeResourceKind>(), Ok(kind));
            let wire = sample(kind);
            let details = NativeResourceDetails::decode_value(&wire)
                .unwrap_or_else(|error| panic!("{kind}: {error}"));
            assert_eq!(details.kind(), kind);
            assert_eq!(details.tag_str(), kind.as_str());
            assert_eq!(details.to_value(), wire, "{kind}");
            assert_eq!(NativeResourceDetails::decode(&details.encode()), Ok(details.clone()));
            assert!(details.validate().is_empty(), "{kind}: {:?}", details.validate());
        }
    }

    #[test]
    fn payload_type_names_are_not_tags() {
        let wire = json!({ "kind": "NativeResourceXrdValue" });
        assert_eq!(
            NativeResourceDetails::decode_value(&wire),
            Err(CodecError::UnknownVariant {
                family: "NativeResourceDetails",
                tag: "NativeResourceXrdValue".into(),
            })
        );
        assert!(matches!(
            NativeResourceXrdValue::decode_value(&wire),
            Err(CodecError::DiscriminatorMismatch { variant: "NativeResourceXrdValue", .. })
        ));
    }

    #[test]
    fn pool_units_carry_redemption_values() {
        let wire = json!({
            "kind": "TwoResourcePoolUnit",
            "pool_address": "pool_rdx1c5",
            "redemption_resource_count": 2,
            "unit_redemption_value": [
                { "resource_address": "resource_rdx1a", "amount": "0.5" },
                { "resource_address": "resource_rdx1b" },
            ],
        });
        let details = NativeResourceDetails::decode_value(&wire).unwrap();
        assert_eq!(details.to_value(), wire);
        let items = details.unit_redemption_value().unwrap();
        assert_eq!(items[0].amount().map(String::as_str), Some("0.5"));
        assert_eq!(items[1].amount(), None);
        assert!(details.validate().is_empty());
    }

    #[test]
    fn count_must_match_redemption_values() {
        let details = NativeResourceDetails::from(NativeResourceOneResourcePoolUnitValue::new(
            "pool_rdx1c5".into(),
            2,
            vec![NativeResourceRedemptionValueItem::new("resource_rdx1a".into(), Some("1e3".into()))],
        ));
        let fields = details.validate().into_iter().map(|v| v.field).collect::<Vec<_>>();
        assert_eq!(fields, ["redemption_resource_count", "unit_redemption_value[0].amount"]);
    }

    #[test]
    fn redemption_count_must_be_an_integer() {
        let error = NativeResourceDetails::decode_value(&json!({
            "kind": "ValidatorLiquidStakeUnit",
            "validator_address": "validator_rdx1s",
            "redemption_resource_count": "one",
            "unit_redemption_value": [],
        }))
        .unwrap_err();
        assert!(matches!(
            error,
            CodecError::InvalidField {
                variant: "NativeResourceValidatorLiquidStakeUnitValue",
                field: "redemption_resource_count",
                ..
            }
        ));
    }
}
