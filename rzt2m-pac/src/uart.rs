// UART register map of the simulated board. The SCI channels are modelled by
// Renode as PL011-style UARTs with a separate transmit data register and a
// Renesas FIFO receive status register. The generic Cortex-R52 platform has a
// plain PL011 that uses `UART_DR` both ways and `FR_RXFE` for receive.

/***************************************************************************/
/**
 Instances
 =========

 | Constant           | Description                           |
 |--------------------|---------------------------------------|
 | UART0_BASE         | SCI0, CPU-to-CPU communication link   |
 | UART1_BASE         | SCI1, debug console                   |
 | PLATFORM_UART_BASE | PL011 of the generic Cortex-R52 board |

*/
pub const UART0_BASE: usize = 0x8000_1000;
pub const UART1_BASE: usize = 0x8000_1400;
pub const PLATFORM_UART_BASE: usize = 0x9C09_0000;

/***************************************************************************/
/**
 Register Offsets
 ================

 | Constant  | Description                                  |
 |-----------|----------------------------------------------|
 | UART_DR   | Receive data (PL011: transmit data too)      |
 | UART_TDR  | Transmit data register (write)               |
 | UART_FR   | Flag register                                |
 | UART_IBRD | Integer baud rate divisor                    |
 | UART_FBRD | Fractional baud rate divisor                 |
 | UART_LCRH | Line control                                 |
 | UART_CR   | Control                                      |
 | UART_FRSR | FIFO receive status, bit 0 = data ready (DR) |

*/
pub const UART_DR: usize = 0x00;
pub const UART_TDR: usize = 0x04;
pub const UART_FR: usize = 0x18;
pub const UART_IBRD: usize = 0x24;
pub const UART_FBRD: usize = 0x28;
pub const UART_LCRH: usize = 0x2C;
pub const UART_CR: usize = 0x30;
pub const UART_FRSR: usize = 0x50;

/***************************************************************************/
/**
 Flag Register
 =============

 | Constant | Description             |
 |----------|-------------------------|
 | FR_RXFE  | Receive FIFO empty      |
 | FR_TXFF  | Transmit FIFO full      |

*/
pub const FR_RXFE: u32 = 1 << 4;
pub const FR_TXFF: u32 = 1 << 5;

/// Data ready bit of `UART_FRSR`.
pub const FRSR_DR: u32 = 1 << 0;

/***************************************************************************/
/**
 Control Register
 ================

 | Constant  | Description     |
 |-----------|-----------------|
 | CR_UARTEN | UART enable     |
 | CR_TXE    | Transmit enable |
 | CR_RXE    | Receive enable  |

*/
pub const CR_UARTEN: u32 = 1 << 0;
pub const CR_TXE: u32 = 1 << 8;
pub const CR_RXE: u32 = 1 << 9;

/***************************************************************************/
/**
 Line Control
 ============

 | Constant    | Description               |
 |-------------|---------------------------|
 | LCRH_FEN    | Enable FIFOs              |
 | LCRH_WLEN_5 | 5 bits of data per frame  |
 | LCRH_WLEN_6 | 6 bits of data per frame  |
 | LCRH_WLEN_7 | 7 bits of data per frame  |
 | LCRH_WLEN_8 | 8 bits of data per frame  |

*/
pub const LCRH_FEN: u32 = 1 << 4;
pub const LCRH_WLEN_5: u32 = 0 << 5;
pub const LCRH_WLEN_6: u32 = 1 << 5;
pub const LCRH_WLEN_7: u32 = 2 << 5;
pub const LCRH_WLEN_8: u32 = 3 << 5;
