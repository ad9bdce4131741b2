/// Declare unit structs standing for a fixed string.
///
/// Each struct serializes to its string and documents itself in the OpenAPI
/// schema as a `const`, so response bodies like `{"message": "..."}` can be
/// typed precisely.
#[macro_export]
macro_rules! const_schema {
    ($($vis:vis $ident:ident($value:literal));* $(;)?) => { $(
        #[derive(Debug, Clone, Copy)]
        $vis struct $ident;

        impl $ident {
            pub const VALUE: &'static str = $value;
        }

        impl ::serde::Serialize for $ident {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(Self::VALUE)
            }
        }

        impl ::schemars::JsonSchema for $ident {
            fn schema_name() -> ::std::string::String {
                ::core::stringify!($ident).into()
            }

            fn is_referenceable() -> bool {
                false
            }

            fn json_schema(_: &mut ::schemars::gen::SchemaGenerator) -> ::schemars::schema::Schema {
                ::schemars::schema::SchemaObject {
                    instance_type: ::core::option::Option::Some(::schemars::schema::InstanceType::String.into()),
                    const_value: ::core::option::Option::Some(Self::VALUE.into()),
                    ..::core::default::Default::default()
                }
                .into()
            }
        }
    )* };
}
