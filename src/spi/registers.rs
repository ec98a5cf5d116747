// RM0008 section 25.5.1, SPI_CR1
pub const CR1_CPHA: u32 = 1;
pub const CR1_CPOL: u32 = 1 << 1;
pub const CR1_MSTR: u32 = 1 << 2;
pub const CR1_LSBFIRST: u32 = 1 << 7;
pub const CR1_SSI: u32 = 1 << 8;
pub const CR1_SSM: u32 = 1 << 9;
pub const CR1_RXONLY: u32 = 1 << 10;
pub const CR1_DFF: u32 = 1 << 11;
pub const CR1_CRCEN: u32 = 1 << 13;
pub const CR1_BIDIMODE: u32 = 1 << 15;
// RM0008 section 25.5.2, SPI_CR2
pub const CR2_SSOE: u32 = 1 << 2;
pub const CR2_FRF: u32 = 1 << 4;
