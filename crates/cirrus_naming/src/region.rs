//! Azure region short codes.

/// Convert an Azure region name to its short code.
///
/// Unknown regions fall back to the first four characters of the
/// normalised name.
///
/// # Examples
///
/// ```rust
/// use cirrus_naming::region_code;
///
/// assert_eq!(region_code("westus2"), "wus2");
/// assert_eq!(region_code("West Europe"), "weu");
/// ```
pub fn region_code(location: &str) -> String {
    let normalized = location.to_lowercase().replace([' ', '-'], "");

    let code = match normalized.as_str() {
        "westus" => "wus",
        "westus2" => "wus2",
        "westus3" => "wus3",
        "eastus" => "eus",
        "eastus2" => "eus2",
        "centralus" => "cus",
        "northcentralus" => "ncus",
        "southcentralus" => "scus",
        "westcentralus" => "wcus",
        "canadacentral" => "cac",
        "canadaeast" => "cae",
        "brazilsouth" => "brs",
        "northeurope" => "neu",
        "westeurope" => "weu",
        "uksouth" => "uks",
        "ukwest" => "ukw",
        "francecentral" => "frc",
        "francesouth" => "frs",
        "germanywestcentral" => "gwc",
        "norwayeast" => "noe",
        "switzerlandnorth" => "chn",
        "uaenorth" => "uan",
        "southafricanorth" => "san",
        "australiaeast" => "aue",
        "australiasoutheast" => "ause",
        "australiacentral" => "auc",
        "eastasia" => "ea",
        "southeastasia" => "sea",
        "japaneast" => "jpe",
        "japanwest" => "jpw",
        "koreacentral" => "krc",
        "koreasouth" => "krs",
        "centralindia" => "inc",
        "southindia" => "ins",
        "westindia" => "inw",
        _ => return normalized.chars().take(4).collect(),
    };

    code.to_string()
}
