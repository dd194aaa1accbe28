/// Base of the Renesas GPIO block.
pub const GPIO_BASE: usize = 0x800A_0000;

/// Port data registers, one byte per port.
pub const GPIO_PORT_OFS: usize = 0x000;
/// Port mode registers, one 16-bit word per port, 2 bits per pin.
pub const GPIO_PMODE_OFS: usize = 0x200;

pub const GPIO_PMODE_MASK: u16 = 0b11;
pub const GPIO_PMODE_INPUT: u16 = 0b00;
pub const GPIO_PMODE_OUTPUT: u16 = 0b10;

pub const GPIO_PINS_PER_PORT: u8 = 8;

#[inline]
pub const fn gpio_port_addr(port: u8) -> usize {
    GPIO_BASE + GPIO_PORT_OFS + port as usize
}

#[inline]
pub const fn gpio_pmode_addr(port: u8) -> usize {
    GPIO_BASE + GPIO_PMODE_OFS + 2 * port as usize
}
