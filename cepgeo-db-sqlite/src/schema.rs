///////////////////////////////////////////////////////////////////////
// Address cache
///////////////////////////////////////////////////////////////////////

diesel::table! {
    address_cache (postal_code) {
        postal_code -> Text,
        house_number -> Nullable<Text>,
        street -> Nullable<Text>,
        neighborhood -> Nullable<Text>,
        city -> Nullable<Text>,
        state -> Nullable<Text>,
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
        confidence -> Nullable<SmallInt>,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}
